//! Model response types and the output reader.
//!
//! Providers hand back response output either as raw JSON mappings or as
//! typed items. Both shapes are read through the [`FieldReadable`]
//! capability so the reader never branches on the concrete representation:
//!
//! ```text
//! ModelResponse.output: [ message { content: [output_text, ...] },
//!                         function_call { name, arguments, call_id }, ... ]
//!   ├─ collect_output_text() → newline-joined output_text fragments
//!   └─ extract_tool_calls()  → Vec<ToolCallRequest>, in order
//! ```

use crate::tool::entities::{RawArguments, ToolCallRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Capability-based field lookup over heterogeneous response items.
///
/// Missing fields are never an error: lookups return `None` (or the
/// caller's default) so readers fail softly.
pub trait FieldReadable: fmt::Debug + Send + Sync {
    /// Look up a named field.
    fn field(&self, key: &str) -> Option<Value>;

    /// Look up a named field, falling back to `default`.
    fn field_or(&self, key: &str, default: Value) -> Value {
        self.field(key).unwrap_or(default)
    }

    /// Look up a named field that is expected to hold text.
    fn str_field(&self, key: &str) -> Option<String> {
        match self.field(key)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Mapping adapter: key lookup on JSON objects, nothing on other values.
impl FieldReadable for Value {
    fn field(&self, key: &str) -> Option<Value> {
        self.as_object().and_then(|map| map.get(key)).cloned()
    }
}

impl<T: FieldReadable + ?Sized> FieldReadable for Box<T> {
    fn field(&self, key: &str) -> Option<Value> {
        (**self).field(key)
    }
}

/// A typed content fragment inside a `message` output item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    OutputText { text: String },
    Refusal { refusal: String },
}

impl FieldReadable for ContentPart {
    fn field(&self, key: &str) -> Option<Value> {
        match (self, key) {
            (ContentPart::OutputText { .. }, "type") => Some(Value::from("output_text")),
            (ContentPart::OutputText { text }, "text") => Some(Value::from(text.as_str())),
            (ContentPart::Refusal { .. }, "type") => Some(Value::from("refusal")),
            (ContentPart::Refusal { refusal }, "refusal") => Some(Value::from(refusal.as_str())),
            _ => None,
        }
    }
}

/// A typed response output item (attribute-bearing representation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<ContentPart>,
    },
    FunctionCall {
        name: String,
        arguments: String,
        #[serde(default)]
        call_id: Option<String>,
    },
}

impl OutputItem {
    /// A message item holding a single text fragment.
    pub fn text(text: impl Into<String>) -> Self {
        OutputItem::Message {
            content: vec![ContentPart::OutputText { text: text.into() }],
        }
    }

    pub fn function_call(
        name: impl Into<String>,
        arguments: impl Into<String>,
        call_id: Option<&str>,
    ) -> Self {
        OutputItem::FunctionCall {
            name: name.into(),
            arguments: arguments.into(),
            call_id: call_id.map(str::to_string),
        }
    }
}

impl FieldReadable for OutputItem {
    fn field(&self, key: &str) -> Option<Value> {
        match self {
            OutputItem::Message { content } => match key {
                "type" => Some(Value::from("message")),
                "content" => serde_json::to_value(content).ok(),
                _ => None,
            },
            OutputItem::FunctionCall {
                name,
                arguments,
                call_id,
            } => match key {
                "type" => Some(Value::from("function_call")),
                "name" => Some(Value::from(name.as_str())),
                "arguments" => Some(Value::from(arguments.as_str())),
                "call_id" => call_id.as_deref().map(Value::from),
                _ => None,
            },
        }
    }
}

/// One model generation: an opaque chaining id plus ordered output items.
#[derive(Debug, Default)]
pub struct ModelResponse {
    /// Response-chaining identifier, passed back on the next turn.
    pub id: Option<String>,
    pub output: Vec<Box<dyn FieldReadable>>,
}

impl ModelResponse {
    pub fn new(id: Option<&str>) -> Self {
        Self {
            id: id.map(str::to_string),
            output: Vec::new(),
        }
    }

    /// Read a whole response given in mapping form (`{"id", "output": [...]}`).
    pub fn from_value(value: Value) -> Self {
        let id = value.str_field("id");
        let output = match value.field("output") {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| Box::new(item) as Box<dyn FieldReadable>)
                .collect(),
            _ => Vec::new(),
        };
        Self { id, output }
    }

    pub fn with_item(mut self, item: impl FieldReadable + 'static) -> Self {
        self.output.push(Box::new(item));
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_item(OutputItem::text(text))
    }

    pub fn with_function_call(
        self,
        name: impl Into<String>,
        arguments: impl Into<String>,
        call_id: Option<&str>,
    ) -> Self {
        self.with_item(OutputItem::function_call(name, arguments, call_id))
    }

    pub fn output_text(&self) -> String {
        collect_output_text(&self.output)
    }

    pub fn tool_calls(&self) -> Vec<ToolCallRequest> {
        extract_tool_calls(&self.output)
    }
}

fn item_type<T: FieldReadable + ?Sized>(item: &T) -> Option<String> {
    item.str_field("type")
}

/// Concatenate every `output_text` fragment of every `message` item,
/// newline-joined and trimmed.
pub fn collect_output_text<'a, T>(items: impl IntoIterator<Item = &'a T>) -> String
where
    T: FieldReadable + ?Sized + 'a,
{
    let mut parts: Vec<String> = Vec::new();
    for item in items {
        if item_type(item).as_deref() != Some("message") {
            continue;
        }
        let Some(Value::Array(content)) = item.field("content") else {
            continue;
        };
        for part in &content {
            if item_type(part).as_deref() == Some("output_text")
                && let Some(text) = part.str_field("text")
                && !text.is_empty()
            {
                parts.push(text);
            }
        }
    }
    parts.join("\n").trim().to_string()
}

/// Collect the `function_call` items, in order, as tool-call requests.
pub fn extract_tool_calls<'a, T>(items: impl IntoIterator<Item = &'a T>) -> Vec<ToolCallRequest>
where
    T: FieldReadable + ?Sized + 'a,
{
    items
        .into_iter()
        .filter(|item| item_type(*item).as_deref() == Some("function_call"))
        .map(|item| {
            let raw_arguments = match item.field("arguments") {
                Some(Value::String(text)) => RawArguments::Text(text),
                Some(Value::Object(map)) => RawArguments::Map(map),
                _ => RawArguments::Text("{}".to_string()),
            };
            ToolCallRequest {
                name: item.str_field("name").unwrap_or_default(),
                raw_arguments,
                call_id: item.str_field("call_id"),
            }
        })
        .collect()
}
