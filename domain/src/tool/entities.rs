//! Tool domain entities

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declared schema of a single tool exposed by a tool implementation.
///
/// Tools declare their parameters explicitly; the runtime builds its
/// [`ToolSignature`](super::signature::ToolSignature) catalog from these
/// declarations instead of reflecting over function signatures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "adopt_policy")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Parameter specifications, in declaration order
    pub parameters: Vec<ToolParameter>,
    /// Whether the tool takes an open-ended bag of extra named arguments
    #[serde(default)]
    pub accepts_arbitrary: bool,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint (e.g., "string", "number")
    pub param_type: String,
    /// Default value used when the caller omits the argument
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            accepts_arbitrary: false,
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Mark the tool as accepting any additional named arguments.
    pub fn accepting_arbitrary(mut self) -> Self {
        self.accepts_arbitrary = true;
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
            default: None,
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }

    /// Give the parameter a default value. A defaulted parameter is optional.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self.required = false;
        self
    }
}

/// Arguments as the model supplied them: a JSON text blob or a decoded mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawArguments {
    Text(String),
    Map(Map<String, Value>),
}

impl RawArguments {
    /// Decode into a mapping.
    ///
    /// Text that does not decode to a JSON object yields an empty mapping.
    pub fn to_map(&self) -> Map<String, Value> {
        match self {
            RawArguments::Map(map) => map.clone(),
            RawArguments::Text(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) => map,
                _ => Map::new(),
            },
        }
    }
}

/// A tool invocation requested by the model on one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Requested tool name
    pub name: String,
    /// Arguments as supplied
    pub raw_arguments: RawArguments,
    /// Provider-assigned call identifier, when the protocol has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
}

impl ToolCallRequest {
    pub fn new(name: impl Into<String>, raw_arguments: RawArguments) -> Self {
        Self {
            name: name.into(),
            raw_arguments,
            call_id: None,
        }
    }

    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }

    pub fn arguments(&self) -> Map<String, Value> {
        self.raw_arguments.to_map()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("inspect_option", "Inspect one option").with_parameter(
            ToolParameter::new("option_id", "Option identifier", true),
        );

        assert_eq!(tool.name, "inspect_option");
        assert!(!tool.accepts_arbitrary);
        assert_eq!(tool.parameters.len(), 1);
        assert!(tool.parameter("option_id").unwrap().required);
        assert!(tool.parameter("missing").is_none());
    }

    #[test]
    fn test_default_makes_parameter_optional() {
        let param = ToolParameter::new("limit", "Max items", true)
            .with_type("integer")
            .with_default(10);
        assert!(!param.required);
        assert_eq!(param.default, Some(json!(10)));
        assert_eq!(param.param_type, "integer");
    }

    #[test]
    fn test_raw_arguments_decoding() {
        let text = RawArguments::Text("{\"option_id\": \"X\"}".to_string());
        assert_eq!(text.to_map().get("option_id"), Some(&json!("X")));

        assert!(RawArguments::Text("not json".to_string()).to_map().is_empty());
        assert!(RawArguments::Text("[1, 2]".to_string()).to_map().is_empty());

        let mut map = Map::new();
        map.insert("k".to_string(), json!(true));
        assert_eq!(RawArguments::Map(map.clone()).to_map(), map);
    }

    #[test]
    fn test_tool_call_request() {
        let call = ToolCallRequest::new("submit_order", RawArguments::Text("{}".to_string()))
            .with_call_id("call_1");
        assert_eq!(call.call_id.as_deref(), Some("call_1"));
        assert!(call.arguments().is_empty());
    }
}
