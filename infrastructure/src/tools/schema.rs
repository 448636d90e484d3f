//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing provider-neutral
//! function tools:
//!
//! ```json
//! {"type": "function", "name": "...", "description": "...",
//!  "parameters": {"type": "object", "properties": {...}, "required": [...]}}
//! ```

use agentic_application::ports::tool_schema::ToolSchemaPort;
use agentic_domain::ToolDefinition;
use agentic_domain::tool::signature::is_private_name;
use serde_json::{Map, Value, json};

/// Default implementation producing provider-neutral JSON Schema.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"number"`, `"integer"`, `"boolean"`, `"array"`, `"object"` → same name
/// - anything else → `"string"`
pub struct JsonSchemaToolConverter;

fn schema_type(param_type: &str) -> &'static str {
    match param_type {
        "number" => "number",
        "integer" => "integer",
        "boolean" => "boolean",
        "array" => "array",
        "object" => "object",
        _ => "string",
    }
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(schema_type(&param.param_type)));
            prop.insert("description".to_string(), json!(param.description));
            if let Some(default) = &param.default {
                prop.insert("default".to_string(), default.clone());
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "function",
            "name": tool.name,
            "description": tool.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
                "additionalProperties": tool.accepts_arbitrary,
            }
        })
    }

    fn all_tools_schema(&self, tools: &[ToolDefinition]) -> Vec<Value> {
        let mut public: Vec<&ToolDefinition> = tools
            .iter()
            .filter(|t| !is_private_name(&t.name))
            .collect();
        public.sort_by_key(|t| &t.name);
        public.into_iter().map(|t| self.tool_to_schema(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentic_domain::ToolParameter;

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("inspect_option", "Inspect one option")
            .with_parameter(ToolParameter::new("option_id", "Option to inspect", true))
            .with_parameter(
                ToolParameter::new("depth", "How much detail", false)
                    .with_type("integer")
                    .with_default(1),
            );

        let schema = converter.tool_to_schema(&tool);

        assert_eq!(schema["type"], "function");
        assert_eq!(schema["name"], "inspect_option");
        assert_eq!(schema["description"], "Inspect one option");
        assert_eq!(schema["parameters"]["type"], "object");
        assert_eq!(schema["parameters"]["additionalProperties"], false);

        let option_prop = &schema["parameters"]["properties"]["option_id"];
        assert_eq!(option_prop["type"], "string");
        assert_eq!(option_prop["description"], "Option to inspect");

        let depth_prop = &schema["parameters"]["properties"]["depth"];
        assert_eq!(depth_prop["type"], "integer");
        assert_eq!(depth_prop["default"], 1);

        let required = schema["parameters"]["required"].as_array().unwrap();
        assert_eq!(required, &vec![json!("option_id")]);
    }

    #[test]
    fn test_accepts_arbitrary_allows_additional_properties() {
        let tool = ToolDefinition::new("annotate", "Attach notes").accepting_arbitrary();
        let schema = JsonSchemaToolConverter.tool_to_schema(&tool);
        assert_eq!(schema["parameters"]["additionalProperties"], true);
        assert!(schema["parameters"]["properties"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_all_tools_schema_sorted_and_public() {
        let converter = JsonSchemaToolConverter;
        let tools = vec![
            ToolDefinition::new("submit_order", "Submit")
                .with_parameter(ToolParameter::new("order_id", "Order", true)),
            ToolDefinition::new("_reset", "Internal"),
            ToolDefinition::new("list_options", "List"),
        ];

        let schemas = converter.all_tools_schema(&tools);
        let names: Vec<&str> = schemas
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["list_options", "submit_order"]);
    }
}
