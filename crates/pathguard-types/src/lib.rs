//! pathguard-types: pure data types shared by the pathguard crates.
//!
//! Nothing here touches the filesystem. The kernel produces these values,
//! the CLI renders them, and embedders can serialize them as JSON.
//!
//! - [`PathKind`] and the marker type names a declaration opts in with
//! - [`Severity`] (configuration) and [`DiagnosticCategory`] (output)
//! - [`Diagnostic`] and [`TextSpan`]

mod diagnostic;
mod kind;

pub use diagnostic::{Diagnostic, DiagnosticCategory, LineCol, Severity, SeverityParseError, TextSpan};
pub use kind::{
    AnyPathStr, FilePathStr, FolderPathStr, PathKind, ANY_PATH_MARKER, FILE_PATH_MARKER,
    FOLDER_PATH_MARKER,
};
