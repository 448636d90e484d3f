//! Parsing `{"name": ..., "args": {...}}` tool calls out of assistant text.

use super::json_recovery::recover_json_object;
use crate::tool::entities::{RawArguments, ToolCallRequest};
use serde_json::{Map, Value};

/// A tool call recovered from free-form assistant text.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedCall {
    pub name: String,
    pub arguments: Map<String, Value>,
    /// The whole recovered object, echoed back into the transcript
    pub raw: Value,
}

impl EmbeddedCall {
    pub fn to_request(&self) -> ToolCallRequest {
        ToolCallRequest::new(self.name.clone(), RawArguments::Map(self.arguments.clone()))
    }
}

/// Recover and parse a text-embedded tool call.
///
/// Returns `None` when no JSON object can be recovered or when its `name`
/// is not text. Arguments are read from `args`, falling back to
/// `arguments`; anything other than an object counts as no arguments.
pub fn parse_embedded_call(raw_text: &str) -> Option<EmbeddedCall> {
    let recovered = recover_json_object(raw_text)?;
    let raw: Value = serde_json::from_str(&recovered).ok()?;
    let object = raw.as_object()?;

    let name = object.get("name")?.as_str()?.to_string();
    let arguments = object
        .get("args")
        .filter(|v| !v.is_null())
        .or_else(|| object.get("arguments"))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    Some(EmbeddedCall {
        name,
        arguments,
        raw,
    })
}
