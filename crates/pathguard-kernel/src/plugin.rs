//! Plugin entry point.
//!
//! A host calls [`init`] once, then [`PathPlugin::create`] for each language
//! service it wants decorated. Configuration arrives as the host's JSON
//! object; the project root is resolved from the host's project directory or,
//! failing that, the current directory.

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::checker::PathChecker;
use crate::config::{CheckerConfig, ConfigError};
use crate::root::{get_project_root, resolve_project_root, RootError};
use crate::service::{LanguageService, PathCheckedService};

/// Errors creating a decorated service.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    Root(#[from] RootError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What the host hands the plugin when creating a service.
#[derive(Debug, Clone)]
pub struct PluginCreateInfo<S> {
    pub language_service: S,
    /// The host's plugin configuration object, `null` for defaults.
    pub config: serde_json::Value,
    /// Directory the host considers the project; root discovery starts here.
    pub project_dir: Option<PathBuf>,
}

impl<S> PluginCreateInfo<S> {
    pub fn new(language_service: S) -> Self {
        Self {
            language_service,
            config: serde_json::Value::Null,
            project_dir: None,
        }
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = config;
        self
    }

    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }
}

/// The plugin module returned by [`init`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PathPlugin {
    _private: (),
}

/// Plugin initializer.
pub fn init() -> PathPlugin {
    PathPlugin::default()
}

impl PathPlugin {
    /// Wrap the host's service so semantic diagnostics include path findings.
    pub fn create<S: LanguageService>(
        &self,
        info: PluginCreateInfo<S>,
    ) -> Result<PathCheckedService<S>, PluginError> {
        let config = CheckerConfig::from_json(&info.config)?;
        let root = match &info.project_dir {
            Some(dir) => resolve_project_root(dir)?,
            None => get_project_root()?,
        };
        info!(
            root = %root.display(),
            severity = %config.severity,
            strict_kinds = config.strict_kinds,
            "path checking enabled"
        );
        let checker = PathChecker::with_root(config, root);
        Ok(PathCheckedService::new(info.language_service, checker))
    }
}
