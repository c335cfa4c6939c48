//! Path kinds and their marker type names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker type name for a path that should name a file.
pub const FILE_PATH_MARKER: &str = "FilePathStr";
/// Marker type name for a path that should name a directory.
pub const FOLDER_PATH_MARKER: &str = "FolderPathStr";
/// Marker type name for a path that may name either.
pub const ANY_PATH_MARKER: &str = "AnyPathStr";

/// A string that should name a file.
///
/// Only a tag: at runtime it is a plain `String`. Source files analyzed by the
/// checker annotate declarations with the type name of the same spelling.
pub type FilePathStr = String;

/// A string that should name a directory.
pub type FolderPathStr = String;

/// A string that should name a file or a directory.
pub type AnyPathStr = String;

/// Declared intent of a path candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    File,
    Folder,
    Any,
}

impl PathKind {
    /// All kinds, in marker declaration order.
    pub const ALL: [PathKind; 3] = [PathKind::File, PathKind::Folder, PathKind::Any];

    /// The marker type name that opts a declaration into this kind.
    pub const fn marker_name(self) -> &'static str {
        match self {
            PathKind::File => FILE_PATH_MARKER,
            PathKind::Folder => FOLDER_PATH_MARKER,
            PathKind::Any => ANY_PATH_MARKER,
        }
    }

    /// Look up a kind by its marker type name (exact, case-sensitive).
    pub fn from_marker_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.marker_name() == name)
    }

    /// Message used by the runtime validators when the caller supplies none.
    pub const fn default_message(self) -> &'static str {
        match self {
            PathKind::File => "Invalid file path",
            PathKind::Folder => "Invalid folder path",
            PathKind::Any => "Invalid path",
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathKind::File => write!(f, "file"),
            PathKind::Folder => write!(f, "folder"),
            PathKind::Any => write!(f, "any"),
        }
    }
}
