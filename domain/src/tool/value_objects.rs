//! Tool domain value objects: result and error types
//!
//! Tool implementations return [`ToolOutcome`]: a JSON result value on
//! success, or a [`ToolError`] that the runtime folds back into the
//! conversation as a failure payload. Nothing a tool does is allowed to
//! end the loop.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Outcome of executing a tool.
pub type ToolOutcome = Result<Value, ToolError>;

/// Error that occurred while resolving or executing a tool call.
///
/// | Code | Raised when |
/// |------|-------------|
/// | `NOT_FOUND` | The requested tool does not exist |
/// | `DUPLICATE_TOOL` | The tool was already used and repeats are disallowed |
/// | `INVALID_ARGUMENT` | The tool rejected its arguments |
/// | `EXECUTION_FAILED` | The tool failed at runtime |
/// | `PANICKED` | The tool panicked; the panic was caught at the call boundary |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "EXECUTION_FAILED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self::new("NOT_FOUND", format!("unknown tool {}", name))
    }

    pub fn already_used(name: &str) -> Self {
        Self::new(
            "DUPLICATE_TOOL",
            format!("tool '{}' already used once; pick a different tool", name),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    pub fn panicked(message: impl Into<String>) -> Self {
        Self::new("PANICKED", message)
    }

    /// Failure payload handed back to the model: `{"ok": false, "error", "code"}`.
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({
            "ok": false,
            "error": self.message,
            "code": self.code,
        });
        if let (Some(details), Some(map)) = (&self.details, payload.as_object_mut()) {
            map.insert("details".to_string(), Value::from(details.as_str()));
        }
        payload
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Flatten an outcome into the JSON value recorded and shown to the model.
pub fn outcome_payload(outcome: &ToolOutcome) -> Value {
    match outcome {
        Ok(value) => value.clone(),
        Err(err) => err.to_payload(),
    }
}

/// Whether a result payload reports success through a boolean `ok` flag.
pub fn is_success_payload(result: &Value) -> bool {
    result.get("ok").and_then(Value::as_bool) == Some(true)
}
