//! Tool implementation port
//!
//! Defines the interface for the tools a loop may invoke.

use agentic_domain::tool::signature::is_private_name;
use agentic_domain::{ToolDefinition, ToolOutcome};
use serde_json::{Map, Value};

/// A set of callable tools with explicitly declared parameters.
///
/// One value is owned by exactly one loop call for its whole duration, so
/// invocation takes `&mut self` and needs no interior locking.
pub trait ToolImplementation: Send {
    /// Declarations of every callable tool.
    ///
    /// Names starting with `_` are private and never callable by a model.
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Check if a tool is callable by a model
    fn has_tool(&self, name: &str) -> bool {
        !is_private_name(name) && self.definitions().iter().any(|d| d.name == name)
    }

    /// Invoke a tool with already-coerced arguments.
    ///
    /// Failures are returned as [`ToolError`](agentic_domain::ToolError)
    /// values. A panic is caught by the runtime and reported the same way.
    fn invoke(&mut self, name: &str, arguments: &Map<String, Value>) -> ToolOutcome;
}

impl ToolImplementation for Box<dyn ToolImplementation> {
    fn definitions(&self) -> Vec<ToolDefinition> {
        (**self).definitions()
    }

    fn has_tool(&self, name: &str) -> bool {
        (**self).has_tool(name)
    }

    fn invoke(&mut self, name: &str, arguments: &Map<String, Value>) -> ToolOutcome {
        (**self).invoke(name, arguments)
    }
}
