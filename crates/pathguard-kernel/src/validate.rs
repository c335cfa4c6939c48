//! Runtime path validators.
//!
//! Each validator returns the candidate unchanged on success. The checks run
//! in order and stop at the first failure:
//!
//! 1. **Type**: the value must be a string (static for `&str`, checked at
//!    runtime by [`PathValidator::validate_value`])
//! 2. **Non-empty**: something must remain after trimming whitespace
//! 3. **Characters**: none of `< > : " | ? *` and no control characters
//! 4. **Containment**: `./` and `../` paths must stay inside the project root
//!
//! File, folder and any validation currently apply identical checks; the
//! kind only selects the default message. The filesystem is never probed
//! for existence here.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use pathguard_types::PathKind;
use serde_json::Value;
use tracing::debug;

use crate::paths::normalize;
use crate::root::{get_project_root, RootError};

/// Characters rejected anywhere in a path, besides control characters.
pub const INVALID_CHARACTERS: [char; 7] = ['<', '>', ':', '"', '|', '?', '*'];

/// Whether `path` holds a forbidden character or a control character
/// (U+0000 through U+001F).
pub fn has_invalid_characters(path: &str) -> bool {
    path.chars()
        .any(|c| INVALID_CHARACTERS.contains(&c) || c <= '\u{1f}')
}

/// Whether the containment check applies to `path`.
pub fn is_root_relative(path: &str) -> bool {
    path.starts_with("./") || path.starts_with("../")
}

/// A failed validation.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// Not a string, or empty after trimming.
    #[error("{message}")]
    Invalid { message: String },

    #[error("{message}: contains invalid characters")]
    InvalidCharacters { message: String },

    #[error("{message}: path escapes project root")]
    EscapesRoot { message: String },

    /// The containment check needed a project root and none was found.
    #[error(transparent)]
    Root(#[from] RootError),
}

/// Path validator bound to a project root.
///
/// [`PathValidator::new`] resolves the root from the working directory, and
/// only when a candidate reaches the containment check.
#[derive(Debug, Clone, Default)]
pub struct PathValidator {
    root: Option<PathBuf>,
}

impl PathValidator {
    /// Validator that resolves the project root from the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator with a known project root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(normalize(&root.into())),
        }
    }

    /// Validate `candidate` as a path of the given kind.
    ///
    /// `message` replaces the kind's default message in any error.
    pub fn validate<'a>(
        &self,
        kind: PathKind,
        candidate: &'a str,
        message: Option<&str>,
    ) -> Result<&'a str, PathError> {
        let message = message.unwrap_or(kind.default_message());

        if candidate.trim().is_empty() {
            return Err(PathError::Invalid {
                message: message.to_string(),
            });
        }

        if has_invalid_characters(candidate) {
            return Err(PathError::InvalidCharacters {
                message: message.to_string(),
            });
        }

        if is_root_relative(candidate) {
            let root = self.root()?;
            let resolved = normalize(&root.join(candidate));
            if !resolved.starts_with(&*root) {
                debug!(
                    candidate,
                    resolved = %resolved.display(),
                    root = %root.display(),
                    "path escapes project root"
                );
                return Err(PathError::EscapesRoot {
                    message: message.to_string(),
                });
            }
        }

        Ok(candidate)
    }

    /// Validate a dynamically typed value, such as one read from JSON.
    ///
    /// Anything but a JSON string fails the type check.
    pub fn validate_value<'a>(
        &self,
        kind: PathKind,
        value: &'a Value,
        message: Option<&str>,
    ) -> Result<&'a str, PathError> {
        match value {
            Value::String(candidate) => self.validate(kind, candidate, message),
            _ => Err(PathError::Invalid {
                message: message.unwrap_or(kind.default_message()).to_string(),
            }),
        }
    }

    pub fn file<'a>(&self, candidate: &'a str, message: Option<&str>) -> Result<&'a str, PathError> {
        self.validate(PathKind::File, candidate, message)
    }

    pub fn folder<'a>(&self, candidate: &'a str, message: Option<&str>) -> Result<&'a str, PathError> {
        self.validate(PathKind::Folder, candidate, message)
    }

    pub fn any<'a>(&self, candidate: &'a str, message: Option<&str>) -> Result<&'a str, PathError> {
        self.validate(PathKind::Any, candidate, message)
    }

    fn root(&self) -> Result<Cow<'_, Path>, RootError> {
        match &self.root {
            Some(root) => Ok(Cow::Borrowed(root.as_path())),
            None => get_project_root().map(Cow::Owned),
        }
    }
}

/// Validate a file path against the working directory's project root.
pub fn validate_file<'a>(path: &'a str, message: Option<&str>) -> Result<&'a str, PathError> {
    PathValidator::new().file(path, message)
}

/// Validate a folder path against the working directory's project root.
pub fn validate_folder<'a>(path: &'a str, message: Option<&str>) -> Result<&'a str, PathError> {
    PathValidator::new().folder(path, message)
}

/// Validate a path of either kind against the working directory's project root.
pub fn validate_any<'a>(path: &'a str, message: Option<&str>) -> Result<&'a str, PathError> {
    PathValidator::new().any(path, message)
}
