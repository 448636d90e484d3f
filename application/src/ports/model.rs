//! Model port
//!
//! Defines the interface for the language model that drives the loop.

use agentic_domain::{Message, ModelResponse};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during a model call
///
/// The loop never retries these; backoff belongs to the adapter.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A model able to answer with structured tool calls.
///
/// This port defines how the loop talks to a provider.
/// Implementations (adapters) live outside the application layer.
#[async_trait]
pub trait ToolCallingModel: Send + Sync {
    /// Declared model name, used to resolve provider quirks.
    fn model_name(&self) -> &str;

    /// Generate one turn with a function-tool list.
    ///
    /// `previous_response_id` is the chaining id of the previous turn's
    /// response, if any. The runtime asks for at most one call per turn
    /// through its system instruction; extra calls are ignored.
    async fn generate_with_tools(
        &self,
        messages: &[Message],
        tools: Option<&[Value]>,
        previous_response_id: Option<&str>,
        max_tokens: u32,
    ) -> Result<ModelResponse, ModelError>;

    /// Generate plain text, without structured tools.
    ///
    /// Default implementation collects the text of a tool-less
    /// [`generate_with_tools`](Self::generate_with_tools) call.
    async fn generate_with_messages(
        &self,
        messages: &[Message],
        max_tokens: u32,
    ) -> Result<String, ModelError> {
        let response = self
            .generate_with_tools(messages, None, None, max_tokens)
            .await?;
        Ok(response.output_text())
    }
}
