//! Lexical path helpers.
//!
//! Neither function touches the filesystem: `.` and `..` are folded by
//! component, symlinks are not followed.

use std::path::{Component, Path, PathBuf};

/// Fold `.` and `..` components of `path`.
///
/// `..` at the root stays at the root, like `/..` does on unix. Leading `..`
/// components of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

/// Relative path leading from `from` to `to`, both taken as absolute.
///
/// Returns `to` itself (absolute) when the two live under different roots,
/// e.g. different drives on windows. An empty path means `from == to`.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from = normalize(from);
    let to = normalize(to);

    if root_of(&from) != root_of(&to) {
        return to;
    }

    let mut from_parts = from.components().peekable();
    let mut to_parts = to.components().peekable();

    while let (Some(a), Some(b)) = (from_parts.peek(), to_parts.peek()) {
        if a != b {
            break;
        }
        from_parts.next();
        to_parts.next();
    }

    let mut rel = PathBuf::new();
    for _ in from_parts {
        rel.push("..");
    }
    for part in to_parts {
        rel.push(part.as_os_str());
    }
    rel
}

fn root_of(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .take_while(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect()
}
