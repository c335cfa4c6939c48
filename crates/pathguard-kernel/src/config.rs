//! Checker configuration.
//!
//! Read from the `[pathguard]` table of `pathguard.toml` at the project root,
//! or from the JSON object a plugin host passes along. Every field is
//! optional.
//!
//! ```toml
//! [pathguard]
//! severity = "warn"     # error | warn | off
//! strict_kinds = true   # FilePathStr must be a file, FolderPathStr a directory
//! ```

use std::io;
use std::path::{Path, PathBuf};

use pathguard_types::Severity;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the static path checker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    /// Category of emitted diagnostics.
    pub severity: Severity,
    /// Require files for `FilePathStr` and directories for `FolderPathStr`
    /// instead of accepting any existing entry.
    pub strict_kinds: bool,
}

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse '{}': {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid plugin configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    pathguard: CheckerConfig,
}

impl CheckerConfig {
    /// Name of the configuration file looked up at the project root.
    pub const FILE_NAME: &'static str = "pathguard.toml";

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_strict_kinds(mut self, strict_kinds: bool) -> Self {
        self.strict_kinds = strict_kinds;
        self
    }

    /// Load `pathguard.toml` from `root`, or defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(Self::FILE_NAME);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        Self::from_toml_str(&content).map_err(|source| ConfigError::Toml { path, source })
    }

    /// Parse the `[pathguard]` table out of a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.pathguard)
    }

    /// Parse a plugin host's JSON configuration object.
    ///
    /// `null` means defaults. Host-specific keys such as `name` are ignored.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ConfigError> {
        #[derive(Deserialize)]
        struct HostConfig {
            #[serde(default)]
            severity: Severity,
            #[serde(default, rename = "strictKinds", alias = "strict_kinds")]
            strict_kinds: bool,
        }

        if value.is_null() {
            return Ok(Self::default());
        }
        let host = HostConfig::deserialize(value)?;
        Ok(Self {
            severity: host.severity,
            strict_kinds: host.strict_kinds,
        })
    }
}
