//! Wiring a configured [`AgentRuntime`] from file configuration.

use crate::config::FileConfig;
use crate::logging::{conversation_logger, init_tracing};
use agentic_application::{AgentRuntime, ToolImplementation};

/// Build a runtime for `tools` from an already validated [`FileConfig`].
///
/// Terminal tools, budgets, the repeat policy and provider rules come from
/// `[runtime]` and `[provider]`; use the `run_*_configured` entry points to
/// apply the step budget and repeat policy. `[logging]` selects the
/// conversation logger and the diagnostic verbosity. The `tracing`
/// subscriber is installed only if none exists yet.
pub fn configure_runtime<T: ToolImplementation>(tools: T, config: &FileConfig) -> AgentRuntime<T> {
    init_tracing(config.logging.verbosity);
    let logger = conversation_logger(&config.logging);
    AgentRuntime::new(tools, Vec::<String>::new())
        .with_config(&config.clone().into_runtime_config())
        .with_conversation_logger(logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::JsonSchemaToolConverter;
    use agentic_application::{ModelError, ToolCallingModel, ToolSchemaPort};
    use agentic_domain::{
        LoopExit, Message, ModelResponse, ToolDefinition, ToolOutcome, ToolParameter,
    };
    use async_trait::async_trait;
    use serde_json::{Map, Value, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ReplayModel {
        outputs: Mutex<VecDeque<Value>>,
    }

    #[async_trait]
    impl ToolCallingModel for ReplayModel {
        fn model_name(&self) -> &str {
            "gpt-4.1"
        }

        async fn generate_with_tools(
            &self,
            _messages: &[Message],
            _tools: Option<&[Value]>,
            _previous_response_id: Option<&str>,
            _max_tokens: u32,
        ) -> Result<ModelResponse, ModelError> {
            let next = self.outputs.lock().unwrap().pop_front();
            next.map(ModelResponse::from_value)
                .ok_or_else(|| ModelError::Other("script exhausted".to_string()))
        }
    }

    struct PolicyDesk;

    impl ToolImplementation for PolicyDesk {
        fn definitions(&self) -> Vec<ToolDefinition> {
            vec![
                ToolDefinition::new("list_options", "List policy options"),
                ToolDefinition::new("adopt_policy", "Adopt one option").with_parameter(
                    ToolParameter::new("option_id", "Option to adopt", true),
                ),
            ]
        }

        fn invoke(&mut self, name: &str, arguments: &Map<String, Value>) -> ToolOutcome {
            match name {
                "list_options" => Ok(json!({"ok": true, "options": ["A", "B"]})),
                _ => Ok(json!({
                    "ok": true,
                    "adoption_receipt": format!("adopted {}", arguments["option_id"]),
                })),
            }
        }
    }

    #[tokio::test]
    async fn test_configured_runtime_logs_conversation() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("run.conversation.jsonl");
        let mut config = FileConfig::default();
        config.runtime.terminal_tools = vec!["adopt_policy".to_string()];
        config.logging.conversation_log = Some(log_path.clone());

        // Responses in mapping form, as a provider SDK would return them.
        let model = ReplayModel {
            outputs: Mutex::new(VecDeque::from(vec![
                json!({"id": "r1", "output": [
                    {"type": "function_call", "name": "list_options", "arguments": "{}", "call_id": "c1"}
                ]}),
                json!({"id": "r2", "output": [
                    {"type": "message", "content": [{"type": "output_text", "text": "Adopting B."}]},
                    {"type": "function_call", "name": "adopt_policy", "arguments": {"choice": "B"}, "call_id": "c2"}
                ]}),
            ])),
        };

        let tools = JsonSchemaToolConverter.all_tools_schema(&PolicyDesk.definitions());
        let mut runtime = configure_runtime(PolicyDesk, &config);
        let result = runtime
            .run_native_configured(&model, &[Message::user("Adopt the cheaper policy.")], &tools)
            .await
            .unwrap();

        assert_eq!(result.exit, LoopExit::Submitted);
        assert_eq!(result.final_text.as_deref(), Some("adopted \"B\""));
        drop(runtime);

        let events: Vec<Value> = std::fs::read_to_string(&log_path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        let types: Vec<&str> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
        assert_eq!(
            types,
            vec![
                "loop_started",
                "model_turn",
                "tool_call",
                "model_turn",
                "tool_call",
                "loop_finished"
            ]
        );
        assert_eq!(events[4]["coercion"], "single_param_rename");
        assert_eq!(events[5]["terminated_successfully"], true);
    }

    #[test]
    fn test_configure_runtime_installs_tracing() {
        let mut config = FileConfig::default();
        config.logging.verbosity = 2;

        let runtime = configure_runtime(PolicyDesk, &config);
        assert!(!runtime.is_terminal("adopt_policy"));
        // A global subscriber is in place after configuration.
        assert!(!init_tracing(0));
    }
}
