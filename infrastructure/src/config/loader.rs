//! Configuration file loader with multi-source merging

use super::file_config::{ConfigValidationError, FileConfig};
use agentic_application::RuntimeConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROJECT_CONFIG_FILE: &str = "agentic.toml";
const ENV_PREFIX: &str = "AGENTIC_";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigValidationError),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `AGENTIC_` environment variables (`__` separates sections,
    ///    e.g. `AGENTIC_RUNTIME__MAX_STEPS=3`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./agentic.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/agentic-runtime/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Load, validate and convert into a [`RuntimeConfig`].
    pub fn load_runtime_config(config_path: Option<&Path>) -> Result<RuntimeConfig, ConfigError> {
        let config = Self::load(config_path)?;
        config.validate()?;
        Ok(config.into_runtime_config())
    }

    /// Load only default configuration
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Default configuration rendered as TOML, as a starting config file.
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&FileConfig::default())
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/agentic-runtime/config.toml` if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("agentic-runtime").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }
}
