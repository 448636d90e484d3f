//! Domain layer for agentic-runtime
//!
//! This crate contains the protocol types and the pure logic of the
//! tool-call loop. It performs no I/O and knows nothing about providers
//! beyond the message-shape rules in [`providers`].
//!
//! # Core Concepts
//!
//! - **Turn**: one model generation followed by at most one tool execution
//! - **Terminal tool**: a tool whose successful execution ends the loop and
//!   yields the final receipt
//! - **Coercion**: reconciling model-supplied arguments with the tool's
//!   declared parameters
//! - **Protocol variant**: native function calling (structured call items)
//!   or text-embedded JSON (a JSON object inside ordinary text)

pub mod agent;
pub mod core;
pub mod protocol;
pub mod providers;
pub mod session;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use agent::{
    EMBEDDED_RECEIPT_FIELDS, InvocationDisposition, LoopExit, LoopResult, NATIVE_RECEIPT_FIELDS,
    ToolInvocationRecord, extract_receipt,
};
pub use core::error::DomainError;
pub use protocol::{EmbeddedCall, parse_embedded_call, recover_json_object};
pub use providers::{ProviderProfile, ProviderRules, normalize_messages};
pub use session::{
    entities::{AssistantToolCall, Message, MessageContent, Role},
    response::{
        ContentPart, FieldReadable, ModelResponse, OutputItem, collect_output_text,
        extract_tool_calls,
    },
};
pub use tool::{
    CoercionDetail, CoercionOutcome, CoercionReason, RawArguments, SignatureCatalog,
    ToolCallRequest, ToolDefinition, ToolError, ToolOutcome, ToolParameter, ToolSignature,
    coerce_arguments,
};
