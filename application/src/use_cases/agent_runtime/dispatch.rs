//! Per-call dispatch: duplicate and unknown checks, coercion, execution.

use super::AgentRuntime;
use super::types::LoopState;
use crate::ports::conversation_logger::ConversationEvent;
use crate::ports::tool_implementation::ToolImplementation;
use agentic_domain::tool::value_objects::outcome_payload;
use agentic_domain::util::preview_json;
use agentic_domain::{
    InvocationDisposition, SignatureCatalog, ToolError, ToolInvocationRecord, ToolOutcome,
    coerce_arguments,
};
use serde_json::{Map, Value, json};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

impl<T: ToolImplementation> AgentRuntime<T> {
    /// Handle one requested call and record it.
    ///
    /// Returns the result payload to show the model and how the call was
    /// handled. Exactly one record is appended to the invocation log.
    pub(super) fn dispatch(
        &mut self,
        state: &mut LoopState,
        catalog: &SignatureCatalog,
        turn: usize,
        name: &str,
        arguments: Map<String, Value>,
        allow_repeat: bool,
    ) -> (Value, InvocationDisposition) {
        if !allow_repeat && state.seen.contains(name) {
            return self.reject(
                state,
                turn,
                name,
                arguments,
                ToolError::already_used(name),
                InvocationDisposition::RejectedDuplicate,
            );
        }

        if !self.tools.has_tool(name) {
            return self.reject(
                state,
                turn,
                name,
                arguments,
                ToolError::unknown_tool(name),
                InvocationDisposition::RejectedUnknown,
            );
        }

        // Tools declared after the catalog was built get a permissive signature.
        let signature = catalog.get_or_permissive(name);
        let coercion = coerce_arguments(&signature, &arguments);
        if coercion.coerced {
            let supplied = Value::Object(arguments.clone());
            let used = Value::Object(coercion.used_arguments.clone());
            info!(
                tool = name,
                reason = %coercion.reason,
                "Coerced arguments for {}: {} -> {}",
                name,
                supplied,
                used
            );
        }

        let outcome = self.execute(name, &coercion.used_arguments);
        if let Err(err) = &outcome {
            warn!(tool = name, code = %err.code, "Tool {} failed: {}", name, err.message);
        }
        let payload = outcome_payload(&outcome);
        debug!(tool = name, "Tool result: {}", preview_json(&payload, 200));

        self.conversation_logger.log(ConversationEvent::new(
            "tool_call",
            json!({
                "turn": turn,
                "name": name,
                "arguments": arguments,
                "arguments_used": coercion.used_arguments,
                "coercion": coercion.reason.as_str(),
                "result": payload,
            }),
        ));

        state.log.push(ToolInvocationRecord::executed(
            turn,
            name,
            arguments,
            coercion,
            payload.clone(),
        ));
        state.seen.insert(name.to_string());

        (payload, InvocationDisposition::Executed)
    }

    fn reject(
        &self,
        state: &mut LoopState,
        turn: usize,
        name: &str,
        arguments: Map<String, Value>,
        error: ToolError,
        disposition: InvocationDisposition,
    ) -> (Value, InvocationDisposition) {
        warn!(tool = name, code = %error.code, "Rejected tool call: {}", error.message);

        let payload = error.to_payload();
        self.conversation_logger.log(ConversationEvent::new(
            "tool_rejected",
            json!({
                "turn": turn,
                "name": name,
                "arguments": arguments,
                "disposition": disposition,
                "result": payload,
            }),
        ));

        state.log.push(ToolInvocationRecord::rejected(
            turn,
            name,
            arguments,
            payload.clone(),
            disposition,
        ));

        (payload, disposition)
    }

    /// Invoke the tool, turning a panic into a `PANICKED` failure.
    fn execute(&mut self, name: &str, arguments: &Map<String, Value>) -> ToolOutcome {
        let tools = &mut self.tools;
        match panic::catch_unwind(AssertUnwindSafe(|| tools.invoke(name, arguments))) {
            Ok(outcome) => outcome,
            Err(payload) => Err(ToolError::panicked(format!(
                "tool '{}' panicked: {}",
                name,
                panic_message(payload.as_ref())
            ))),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
