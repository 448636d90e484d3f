//! Types for the agent runtime use case.

use crate::ports::model::ModelError;
use agentic_domain::{
    EMBEDDED_RECEIPT_FIELDS, LoopExit, LoopResult, Message, NATIVE_RECEIPT_FIELDS,
    ToolInvocationRecord,
};
use std::collections::HashSet;
use thiserror::Error;

/// System instruction for the native function-calling protocol.
pub const NATIVE_INSTRUCTION: &str = "Use at most one tool call per turn. Prefer tool calls over natural language. If a tool was already used, choose a different one.";

/// System instruction for the text-embedded JSON protocol, followed by the
/// serialized tool schema.
pub const EMBEDDED_INSTRUCTION_PREFIX: &str = "You are an agent. At each turn, output exactly one JSON object: {\"name\":\"<tool_name>\",\"args\":{...}}. Do not output extra text. Use each tool at most once. Available tools:\n";

/// Errors that can end a loop call without a [`LoopResult`].
///
/// Tool failures never show up here; they are recorded in the result.
#[derive(Error, Debug)]
pub enum LoopError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Failed to serialize tool schema: {0}")]
    Schema(#[from] serde_json::Error),
}

impl LoopError {
    pub fn is_model_error(&self) -> bool {
        matches!(self, LoopError::Model(_))
    }
}

/// Which tool-call protocol a loop call speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Protocol {
    Native,
    Embedded,
}

impl Protocol {
    pub(super) fn as_str(&self) -> &'static str {
        match self {
            Protocol::Native => "native",
            Protocol::Embedded => "json",
        }
    }

    pub(super) fn receipt_fields(&self) -> &'static [&'static str] {
        match self {
            Protocol::Native => NATIVE_RECEIPT_FIELDS,
            Protocol::Embedded => EMBEDDED_RECEIPT_FIELDS,
        }
    }
}

/// Mutable state of one loop call. Never shared between calls.
#[derive(Debug)]
pub(super) struct LoopState {
    pub(super) transcript: Vec<Message>,
    pub(super) log: Vec<ToolInvocationRecord>,
    /// Names executed so far; only grows
    pub(super) seen: HashSet<String>,
    pub(super) final_text: Option<String>,
    pub(super) turns: usize,
}

impl LoopState {
    /// Protocol instruction first, then the seed exactly as given.
    pub(super) fn new(instruction: String, seed: &[Message]) -> Self {
        let mut transcript = vec![Message::system(instruction)];
        transcript.extend_from_slice(seed);
        Self {
            transcript,
            log: Vec::new(),
            seen: HashSet::new(),
            final_text: None,
            turns: 0,
        }
    }

    pub(super) fn into_result(self, exit: LoopExit) -> LoopResult {
        LoopResult {
            final_transcript: self.transcript,
            invocation_log: self.log,
            terminated_successfully: exit == LoopExit::Submitted,
            final_text: self.final_text,
            exit,
            turns: self.turns,
        }
    }
}
