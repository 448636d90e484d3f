//! Logging infrastructure.
//!
//! - [`init_tracing`] installs the diagnostic `tracing` subscriber
//! - [`JsonlConversationLogger`] writes loop events as JSONL, implementing
//!   the [`ConversationLogger`](agentic_application::ConversationLogger) port

mod jsonl_logger;
mod tracing_init;

pub use jsonl_logger::JsonlConversationLogger;
pub use tracing_init::{init_tracing, verbosity_directive};

use crate::config::FileLoggingConfig;
use agentic_application::{ConversationLogger, NoConversationLogger};
use std::sync::Arc;

/// Conversation logger selected by the `[logging]` section.
///
/// Falls back to [`NoConversationLogger`] when no path is configured or
/// the file cannot be created.
pub fn conversation_logger(config: &FileLoggingConfig) -> Arc<dyn ConversationLogger> {
    match config
        .conversation_log
        .as_ref()
        .and_then(JsonlConversationLogger::new)
    {
        Some(logger) => Arc::new(logger),
        None => Arc::new(NoConversationLogger),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentic_application::ConversationEvent;
    use serde_json::json;

    #[test]
    fn test_conversation_logger_writes_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.jsonl");
        let config = FileLoggingConfig {
            verbosity: 0,
            conversation_log: Some(path.clone()),
        };

        let logger = conversation_logger(&config);
        logger.log(ConversationEvent::new("loop_started", json!({"model": "m"})));
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains(r#""type":"loop_started""#));
    }

    #[test]
    fn test_conversation_logger_disabled_by_default() {
        let logger = conversation_logger(&FileLoggingConfig::default());
        // No file is involved; logging is a no-op.
        logger.log(ConversationEvent::new("loop_started", json!({})));
    }
}
