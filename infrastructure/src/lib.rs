//! Infrastructure layer for agentic-runtime
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, configuration file loading, and logging setup.

pub mod config;
pub mod logging;
pub mod runtime;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig,
    FileProviderConfig, FileRuntimeConfig,
};
pub use logging::{JsonlConversationLogger, conversation_logger, init_tracing};
pub use runtime::configure_runtime;
pub use tools::JsonSchemaToolConverter;
