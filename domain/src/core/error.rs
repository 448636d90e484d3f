//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No tool set registered under '{0}'")]
    UnknownToolSet(String),

    #[error("Invalid tool definition '{tool}': {reason}")]
    InvalidToolDefinition { tool: String, reason: String },
}

impl DomainError {
    /// Check if this error comes from a registry lookup
    pub fn is_unknown_tool_set(&self) -> bool {
        matches!(self, DomainError::UnknownToolSet(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_set_display() {
        let error = DomainError::UnknownToolSet("7".to_string());
        assert_eq!(error.to_string(), "No tool set registered under '7'");
    }

    #[test]
    fn test_is_unknown_tool_set_check() {
        assert!(DomainError::UnknownToolSet("x".to_string()).is_unknown_tool_set());
        assert!(!DomainError::InvalidToolDefinition {
            tool: "adopt_policy".to_string(),
            reason: "duplicate parameter 'option_id'".to_string(),
        }
        .is_unknown_tool_set());
    }
}
