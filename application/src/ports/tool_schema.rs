//! Tool schema conversion port.
//!
//! Separates "which tools exist" (the tool implementation's declarations)
//! from "how to serialize for the API" (infrastructure). The same output
//! serves as the native tool list and, pretty printed, as the schema
//! embedded in the text-embedded JSON instruction.

use agentic_domain::ToolDefinition;

/// Port for converting tool definitions to LLM API format (JSON Schema).
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to provider-neutral JSON Schema.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all public tools to a JSON Schema array (sorted by name).
    fn all_tools_schema(&self, tools: &[ToolDefinition]) -> Vec<serde_json::Value>;
}
