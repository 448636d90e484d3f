//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording loop events
//! (model turns, tool calls, rejections, loop exit) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! conversation in a machine-readable format (JSONL).

use chrono::{DateTime, Utc};
use serde_json::Value;

/// A structured conversation event for logging.
///
/// Each event has a type string, a UTC timestamp, and a JSON payload
/// containing event-specific fields.
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    /// Event type identifier (e.g., "model_turn", "tool_call", "loop_finished").
    pub event_type: &'static str,
    /// When the event was emitted.
    pub timestamp: DateTime<Utc>,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    /// Create a new conversation event with the current UTC timestamp.
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// Port for logging conversation events to a structured log.
///
/// `log` is synchronous and infallible; adapters swallow write failures.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_is_stamped_at_creation() {
        let before = Utc::now();
        let event = ConversationEvent::new("model_turn", json!({"turn": 0}));
        assert!(event.timestamp >= before);
        assert!(event.timestamp <= Utc::now());
        assert_eq!(event.event_type, "model_turn");
    }

    #[test]
    fn test_no_logger_accepts_events() {
        NoConversationLogger.log(ConversationEvent::new("loop_started", json!({})));
    }
}
