//! Application-level configuration.
//!
//! - [`RuntimeConfig`]: loop control parameters

pub mod runtime_config;

pub use runtime_config::RuntimeConfig;
