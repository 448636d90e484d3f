//! Invocation log and loop result.
//!
//! Every turn that reaches the dispatch step produces exactly one
//! [`ToolInvocationRecord`], including calls rejected as duplicates or
//! unknown tools. Records are appended in turn order and never rewritten.

use crate::session::entities::Message;
use crate::tool::coercion::CoercionOutcome;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a requested call was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationDisposition {
    Executed,
    RejectedDuplicate,
    RejectedUnknown,
}

impl InvocationDisposition {
    pub fn is_executed(&self) -> bool {
        matches!(self, InvocationDisposition::Executed)
    }
}

/// One dispatched tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocationRecord {
    /// Zero-based turn on which the call was made
    pub turn_index: usize,
    pub name: String,
    /// Arguments exactly as the model supplied them (decoded)
    pub original_arguments: Map<String, Value>,
    pub coercion: CoercionOutcome,
    /// Arguments the tool actually received; empty for rejected calls
    pub arguments_used: Map<String, Value>,
    /// Result payload, or the rejection/failure payload
    pub result: Value,
    pub disposition: InvocationDisposition,
}

impl ToolInvocationRecord {
    /// Record for a call that was turned away before execution.
    pub fn rejected(
        turn_index: usize,
        name: impl Into<String>,
        original_arguments: Map<String, Value>,
        result: Value,
        disposition: InvocationDisposition,
    ) -> Self {
        Self {
            turn_index,
            name: name.into(),
            original_arguments,
            coercion: CoercionOutcome::untouched(),
            arguments_used: Map::new(),
            result,
            disposition,
        }
    }

    pub fn executed(
        turn_index: usize,
        name: impl Into<String>,
        original_arguments: Map<String, Value>,
        coercion: CoercionOutcome,
        result: Value,
    ) -> Self {
        Self {
            turn_index,
            name: name.into(),
            original_arguments,
            arguments_used: coercion.used_arguments.clone(),
            coercion,
            result,
            disposition: InvocationDisposition::Executed,
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopExit {
    /// A terminal tool succeeded.
    Submitted,
    /// The model answered without calling a tool.
    NoToolCall,
    /// Text-embedded output held no recoverable tool call.
    ProtocolViolation,
    /// The step budget ran out.
    BudgetExhausted,
}

/// Outcome of one loop call. Produced exactly once, at loop exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopResult {
    pub final_transcript: Vec<Message>,
    pub invocation_log: Vec<ToolInvocationRecord>,
    pub terminated_successfully: bool,
    pub final_text: Option<String>,
    pub exit: LoopExit,
    /// Number of model turns taken
    pub turns: usize,
}

impl LoopResult {
    pub fn executed(&self) -> impl Iterator<Item = &ToolInvocationRecord> {
        self.invocation_log
            .iter()
            .filter(|r| r.disposition.is_executed())
    }

    pub fn rejected(&self) -> impl Iterator<Item = &ToolInvocationRecord> {
        self.invocation_log
            .iter()
            .filter(|r| !r.disposition.is_executed())
    }

    /// How many times `name` was actually executed.
    pub fn execution_count(&self, name: &str) -> usize {
        self.executed().filter(|r| r.name == name).count()
    }
}
