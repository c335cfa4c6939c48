//! Project-root discovery.
//!
//! The project root is the nearest ancestor directory (the start directory
//! included) containing any of [`PROJECT_MARKERS`]. It is recomputed on every
//! call; nothing is cached.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::paths::normalize;

/// Files and directories that mark a project root, in probe order.
pub const PROJECT_MARKERS: [&str; 8] = [
    ".git",
    "package.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "package-lock.json",
    "lerna.json",
    "nx.json",
    "workspace.json",
];

/// Errors from project-root discovery.
#[derive(Debug, thiserror::Error)]
pub enum RootError {
    /// No ancestor directory contained a marker.
    #[error(
        "project root not found (searched from '{}'): run inside a project directory containing one of {}",
        searched_from.display(),
        PROJECT_MARKERS.join(", ")
    )]
    NotFound { searched_from: PathBuf },

    /// The working directory could not be determined.
    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] io::Error),
}

/// Resolve the project root from the current working directory.
pub fn get_project_root() -> Result<PathBuf, RootError> {
    let cwd = std::env::current_dir().map_err(RootError::CurrentDir)?;
    resolve_project_root(&cwd)
}

/// Search upward from `start` for the nearest directory holding a marker.
///
/// A relative `start` is made absolute against the working directory first.
/// Probe errors (permission denied and the like) count as "not present".
pub fn resolve_project_root(start: &Path) -> Result<PathBuf, RootError> {
    let start = normalize(&std::path::absolute(start).map_err(RootError::CurrentDir)?);
    let mut current = start.as_path();

    loop {
        if let Some(marker) = find_marker(current) {
            debug!(root = %current.display(), marker, "found project root");
            return Ok(current.to_path_buf());
        }

        match current.parent() {
            Some(parent) if parent != current => current = parent,
            _ => {
                return Err(RootError::NotFound {
                    searched_from: start,
                });
            }
        }
    }
}

/// Whether [`resolve_project_root`] would succeed starting from `dir`.
pub fn is_project_root(dir: &Path) -> bool {
    resolve_project_root(dir).is_ok()
}

/// First marker present as a direct child of `dir`.
fn find_marker(dir: &Path) -> Option<&'static str> {
    PROJECT_MARKERS.into_iter().find(|marker| {
        let present = dir.join(marker).exists();
        trace!(dir = %dir.display(), marker, present, "probe");
        present
    })
}
