//! Agent runtime use case
//!
//! Drives a model through a bounded tool-call loop. Two protocol variants
//! share one engine:
//!
//! | Step                 | Native ([`run_native`](AgentRuntime::run_native)) | Text-embedded ([`run_json`](AgentRuntime::run_json)) |
//! |----------------------|-------------------------------|------------------------------------|
//! | Tools offered as     | structured function tools     | schema inside the system message   |
//! | Call read from       | first `function_call` item    | JSON object recovered from text    |
//! | Call echoed as       | assistant `tool_calls` turn\* | assistant text (the raw object)    |
//! | Result appended as   | `tool` message\*              | `user` message                     |
//! | No call on a turn    | ends, text is the answer      | ends, raw text is the answer       |
//! | Receipt fields       | receipt, adoption_receipt, message, text | receipt, message, text  |
//!
//! \* Providers without linked tool turns get a plain JSON text echo and an
//! unlinked `tool` message instead.
//!
//! Per turn, a requested call is rejected as a duplicate (unless repeats
//! are allowed), rejected as unknown, or coerced and executed. Every one of
//! these outcomes is recorded and fed back to the model. A successful call
//! to a terminal tool ends the loop with its receipt as the final text.

mod dispatch;
mod types;

pub use types::{EMBEDDED_INSTRUCTION_PREFIX, LoopError, NATIVE_INSTRUCTION};

use types::{LoopState, Protocol};

use crate::config::RuntimeConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::model::ToolCallingModel;
use crate::ports::tool_implementation::ToolImplementation;
use crate::registry::ToolFactoryRegistry;
use agentic_domain::tool::value_objects::is_success_payload;
use agentic_domain::util::truncate_str;
use agentic_domain::{
    AssistantToolCall, DomainError, InvocationDisposition, LoopExit, LoopResult, Message,
    ProviderProfile, ProviderRules, SignatureCatalog, ToolCallRequest, extract_receipt,
    normalize_messages, parse_embedded_call,
};
use serde_json::{Map, Value, json};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case for running a tool-call loop against one tool implementation.
///
/// The runtime owns its tool implementation; loop state (transcript,
/// invocation log, seen names) is local to each `run_*` call.
pub struct AgentRuntime<T: ToolImplementation> {
    tools: T,
    terminal_tools: BTreeSet<String>,
    max_steps: usize,
    allow_repeat: bool,
    max_tokens: u32,
    provider_rules: ProviderRules,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl<T: ToolImplementation> AgentRuntime<T> {
    pub fn new<I, S>(tools: T, terminal_tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let defaults = RuntimeConfig::default();
        Self {
            tools,
            terminal_tools: terminal_tools.into_iter().map(Into::into).collect(),
            max_steps: defaults.max_steps,
            allow_repeat: defaults.allow_repeat,
            max_tokens: defaults.max_tokens,
            provider_rules: defaults.provider,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Take terminal tools, budgets, repeat policy and provider rules from
    /// `config`.
    pub fn with_config(mut self, config: &RuntimeConfig) -> Self {
        self.terminal_tools = config.terminal_tools.clone();
        self.max_steps = config.max_steps;
        self.allow_repeat = config.allow_repeat;
        self.max_tokens = config.max_tokens;
        self.provider_rules = config.provider.clone();
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_allow_repeat(mut self, allow_repeat: bool) -> Self {
        self.allow_repeat = allow_repeat;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_provider_rules(mut self, rules: ProviderRules) -> Self {
        self.provider_rules = rules;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn tools(&self) -> &T {
        &self.tools
    }

    pub fn into_tools(self) -> T {
        self.tools
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.terminal_tools.contains(name)
    }

    /// Run the native function-calling loop.
    ///
    /// `tools` is the function-tool list offered to the model on every turn.
    /// Only a model failure is returned as `Err`.
    pub async fn run_native(
        &mut self,
        model: &dyn ToolCallingModel,
        seed: &[Message],
        tools: &[Value],
        max_steps: usize,
        allow_repeat: bool,
    ) -> Result<LoopResult, LoopError> {
        let protocol = Protocol::Native;
        let profile = self.provider_rules.profile_for(model.model_name());
        let catalog = SignatureCatalog::from_definitions(&self.tools.definitions());
        let mut state = LoopState::new(NATIVE_INSTRUCTION.to_string(), seed);
        self.log_loop_started(protocol, model, &catalog, max_steps, allow_repeat);

        let mut previous_response_id: Option<String> = None;
        for turn in 0..max_steps {
            state.turns = turn + 1;

            let response = {
                let outgoing = normalize_messages(&state.transcript, &profile);
                model
                    .generate_with_tools(
                        &outgoing,
                        Some(tools),
                        previous_response_id.as_deref(),
                        self.max_tokens,
                    )
                    .await?
            };
            previous_response_id = response.id.clone();

            let text = response.output_text();
            let mut calls = response.tool_calls().into_iter();
            self.log_model_turn(turn, &text, calls.len());

            let Some(request) = calls.next() else {
                debug!("Turn {}: no tool call, treating text as the answer", turn);
                state.final_text = Some(text);
                return Ok(self.finish(state, protocol, LoopExit::NoToolCall));
            };
            if calls.len() > 0 {
                debug!(
                    "Turn {}: ignoring {} extra tool call(s) after {}",
                    turn,
                    calls.len(),
                    request.name
                );
            }
            if !text.is_empty() {
                state.final_text = Some(text);
            }

            let arguments = request.arguments();
            state
                .transcript
                .push(native_echo(&request, &arguments, &profile));

            let (payload, disposition) = self.dispatch(
                &mut state,
                &catalog,
                turn,
                &request.name,
                arguments,
                allow_repeat,
            );

            let call_id = request.call_id.clone().filter(|_| profile.linked_tool_turns);
            state
                .transcript
                .push(Message::tool(payload.to_string(), call_id));

            if let Some(receipt) = self.terminal_receipt(protocol, &request.name, disposition, &payload)
            {
                state.final_text = Some(receipt);
                return Ok(self.finish(state, protocol, LoopExit::Submitted));
            }
        }

        Ok(self.finish(state, protocol, LoopExit::BudgetExhausted))
    }

    /// Run the text-embedded JSON loop.
    ///
    /// `tools_schema` is inserted verbatim into the system instruction.
    pub async fn run_json(
        &mut self,
        model: &dyn ToolCallingModel,
        seed: &[Message],
        tools_schema: &str,
        max_steps: usize,
        allow_repeat: bool,
    ) -> Result<LoopResult, LoopError> {
        let protocol = Protocol::Embedded;
        let profile = self.provider_rules.profile_for(model.model_name());
        let catalog = SignatureCatalog::from_definitions(&self.tools.definitions());
        let mut state = LoopState::new(format!("{EMBEDDED_INSTRUCTION_PREFIX}{tools_schema}"), seed);
        self.log_loop_started(protocol, model, &catalog, max_steps, allow_repeat);

        for turn in 0..max_steps {
            state.turns = turn + 1;

            let raw = {
                let outgoing = normalize_messages(&state.transcript, &profile);
                model
                    .generate_with_messages(&outgoing, self.max_tokens)
                    .await?
            };

            let call = parse_embedded_call(&raw);
            self.log_model_turn(turn, &raw, usize::from(call.is_some()));

            let Some(call) = call else {
                warn!(
                    "Turn {}: no recoverable tool call in model output: {}",
                    turn,
                    truncate_str(&raw, 100)
                );
                state.final_text = Some(raw.trim().to_string());
                return Ok(self.finish(state, protocol, LoopExit::ProtocolViolation));
            };

            state.transcript.push(Message::assistant(call.raw.to_string()));

            let request = call.to_request();
            let (payload, disposition) = self.dispatch(
                &mut state,
                &catalog,
                turn,
                &request.name,
                request.arguments(),
                allow_repeat,
            );
            state.transcript.push(Message::user(payload.to_string()));

            if let Some(receipt) =
                self.terminal_receipt(protocol, &request.name, disposition, &payload)
            {
                state.final_text = Some(receipt);
                return Ok(self.finish(state, protocol, LoopExit::Submitted));
            }
        }

        Ok(self.finish(state, protocol, LoopExit::BudgetExhausted))
    }

    /// Run the native loop, falling back to the JSON loop on a model error.
    ///
    /// The fallback sends `tools` pretty printed as the embedded schema.
    /// A model error from the fallback itself is returned.
    pub async fn run_with_fallback(
        &mut self,
        model: &dyn ToolCallingModel,
        seed: &[Message],
        tools: &[Value],
        max_steps: usize,
        allow_repeat: bool,
    ) -> Result<LoopResult, LoopError> {
        match self
            .run_native(model, seed, tools, max_steps, allow_repeat)
            .await
        {
            Err(LoopError::Model(e)) => {
                warn!(
                    "Native tool calling failed for {}, falling back to JSON protocol: {}",
                    model.model_name(),
                    e
                );
                let schema = serde_json::to_string_pretty(tools)?;
                self.run_json(model, seed, &schema, max_steps, allow_repeat)
                    .await
            }
            other => other,
        }
    }

    /// [`run_native`](Self::run_native) with the configured step budget
    /// and repeat policy.
    pub async fn run_native_configured(
        &mut self,
        model: &dyn ToolCallingModel,
        seed: &[Message],
        tools: &[Value],
    ) -> Result<LoopResult, LoopError> {
        let (max_steps, allow_repeat) = (self.max_steps, self.allow_repeat);
        self.run_native(model, seed, tools, max_steps, allow_repeat)
            .await
    }

    /// [`run_json`](Self::run_json) with the configured step budget and
    /// repeat policy.
    pub async fn run_json_configured(
        &mut self,
        model: &dyn ToolCallingModel,
        seed: &[Message],
        tools_schema: &str,
    ) -> Result<LoopResult, LoopError> {
        let (max_steps, allow_repeat) = (self.max_steps, self.allow_repeat);
        self.run_json(model, seed, tools_schema, max_steps, allow_repeat)
            .await
    }

    /// [`run_with_fallback`](Self::run_with_fallback) with the configured
    /// step budget and repeat policy.
    pub async fn run_with_fallback_configured(
        &mut self,
        model: &dyn ToolCallingModel,
        seed: &[Message],
        tools: &[Value],
    ) -> Result<LoopResult, LoopError> {
        let (max_steps, allow_repeat) = (self.max_steps, self.allow_repeat);
        self.run_with_fallback(model, seed, tools, max_steps, allow_repeat)
            .await
    }

    fn terminal_receipt(
        &self,
        protocol: Protocol,
        name: &str,
        disposition: InvocationDisposition,
        payload: &Value,
    ) -> Option<String> {
        if !disposition.is_executed() || !self.is_terminal(name) || !is_success_payload(payload) {
            return None;
        }
        let receipt = extract_receipt(payload, protocol.receipt_fields());
        info!("Terminal tool {} succeeded: {}", name, truncate_str(&receipt, 100));
        Some(receipt)
    }

    fn finish(&self, state: LoopState, protocol: Protocol, exit: LoopExit) -> LoopResult {
        let result = state.into_result(exit);
        info!(
            protocol = protocol.as_str(),
            "Loop finished: {:?} after {} turn(s), {} call(s) recorded",
            exit,
            result.turns,
            result.invocation_log.len()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "loop_finished",
            json!({
                "protocol": protocol.as_str(),
                "exit": exit,
                "turns": result.turns,
                "terminated_successfully": result.terminated_successfully,
                "final_text": result.final_text,
            }),
        ));
        result
    }

    fn log_loop_started(
        &self,
        protocol: Protocol,
        model: &dyn ToolCallingModel,
        catalog: &SignatureCatalog,
        max_steps: usize,
        allow_repeat: bool,
    ) {
        info!(
            protocol = protocol.as_str(),
            "Starting loop with {} ({} tools, max_steps={}, allow_repeat={})",
            model.model_name(),
            catalog.len(),
            max_steps,
            allow_repeat
        );
        self.conversation_logger.log(ConversationEvent::new(
            "loop_started",
            json!({
                "protocol": protocol.as_str(),
                "model": model.model_name(),
                "tools": catalog.names().collect::<Vec<_>>(),
                "terminal_tools": self.terminal_tools,
                "max_steps": max_steps,
                "allow_repeat": allow_repeat,
            }),
        ));
    }

    fn log_model_turn(&self, turn: usize, text: &str, tool_calls: usize) {
        debug!(
            "Turn {}: {} tool call(s), text: {}",
            turn,
            tool_calls,
            truncate_str(text, 100)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "model_turn",
            json!({
                "turn": turn,
                "text": text,
                "tool_calls": tool_calls,
            }),
        ));
    }
}

impl AgentRuntime<Box<dyn ToolImplementation>> {
    /// Build a runtime owning a fresh tool implementation from `registry`.
    pub fn from_registry<I, S>(
        registry: &ToolFactoryRegistry,
        id: &str,
        terminal_tools: I,
    ) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tools = registry.instantiate(id)?;
        Ok(Self::new(tools, terminal_tools))
    }
}

/// Assistant echo of the call the native loop is about to dispatch.
fn native_echo(
    request: &ToolCallRequest,
    arguments: &Map<String, Value>,
    profile: &ProviderProfile,
) -> Message {
    if profile.linked_tool_turns {
        Message::assistant_tool_calls(vec![AssistantToolCall::function(
            request.call_id.clone(),
            request.name.clone(),
            Value::Object(arguments.clone()).to_string(),
        )])
    } else {
        Message::assistant(json!({"name": request.name, "args": arguments}).to_string())
    }
}
