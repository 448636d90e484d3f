//! Configuration file loading for agentic-runtime
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `AGENTIC_`-prefixed environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./agentic.toml`
//! 4. Global: `$XDG_CONFIG_HOME/agentic-runtime/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLoggingConfig, FileProviderConfig, FileRuntimeConfig,
};
pub use loader::{ConfigError, ConfigLoader};
