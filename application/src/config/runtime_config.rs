//! Runtime parameters for one [`AgentRuntime`](crate::use_cases::agent_runtime::AgentRuntime).
//!
//! These are application-layer concerns: the file format and its loading
//! live in infrastructure, which converts into this type.

use agentic_domain::ProviderRules;
use std::collections::BTreeSet;

/// Loop control parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Maximum model turns per loop call.
    pub max_steps: usize,
    /// Token budget passed to every model call.
    pub max_tokens: u32,
    /// Allow the same tool to be executed more than once per loop call.
    pub allow_repeat: bool,
    /// Tools whose successful execution ends the loop.
    pub terminal_tools: BTreeSet<String>,
    pub provider: ProviderRules,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_steps: 8,
            max_tokens: 8192,
            allow_repeat: false,
            terminal_tools: BTreeSet::new(),
            provider: ProviderRules::default(),
        }
    }
}

impl RuntimeConfig {
    // ==================== Builder Methods ====================

    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    pub fn with_allow_repeat(mut self, allow: bool) -> Self {
        self.allow_repeat = allow;
        self
    }

    pub fn with_terminal_tool(mut self, name: impl Into<String>) -> Self {
        self.terminal_tools.insert(name.into());
        self
    }

    pub fn with_provider_rules(mut self, rules: ProviderRules) -> Self {
        self.provider = rules;
        self
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.terminal_tools.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.max_steps, 8);
        assert_eq!(config.max_tokens, 8192);
        assert!(!config.allow_repeat);
        assert!(config.terminal_tools.is_empty());
        assert_eq!(config.provider, ProviderRules::default());
    }

    #[test]
    fn test_builder_chain() {
        let config = RuntimeConfig::default()
            .with_max_steps(3)
            .with_max_tokens(512)
            .with_allow_repeat(true)
            .with_terminal_tool("submit_order")
            .with_terminal_tool("adopt_policy");

        assert_eq!(config.max_steps, 3);
        assert_eq!(config.max_tokens, 512);
        assert!(config.allow_repeat);
        assert!(config.is_terminal("submit_order"));
        assert!(config.is_terminal("adopt_policy"));
        assert!(!config.is_terminal("list_options"));
    }
}
