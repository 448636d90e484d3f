//! Application layer for agentic-runtime
//!
//! This crate contains the loop engine, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod registry;
pub mod use_cases;

// Re-export commonly used types
pub use config::RuntimeConfig;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    model::{ModelError, ToolCallingModel},
    tool_implementation::ToolImplementation,
    tool_schema::ToolSchemaPort,
};
pub use registry::ToolFactoryRegistry;
pub use use_cases::agent_runtime::{
    AgentRuntime, EMBEDDED_INSTRUCTION_PREFIX, LoopError, NATIVE_INSTRUCTION,
};
