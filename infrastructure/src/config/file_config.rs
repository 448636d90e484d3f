//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file:
//!
//! ```toml
//! [runtime]
//! max_steps = 8
//! max_tokens = 8192
//! allow_repeat = false
//! terminal_tools = ["submit_order"]
//!
//! [provider]
//! cache_control_families = ["claude", "sonnet", "anthropic"]
//! unlinked_tool_turn_models = ["gpt-5"]
//!
//! [logging]
//! verbosity = 1
//! conversation_log = "logs/run.conversation.jsonl"
//! ```

use agentic_application::RuntimeConfig;
use agentic_domain::ProviderRules;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("runtime.max_steps cannot be 0")]
    ZeroMaxSteps,

    #[error("runtime.max_tokens cannot be 0")]
    ZeroMaxTokens,

    #[error("terminal tool name cannot be empty")]
    EmptyTerminalTool,
}

/// Raw runtime configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRuntimeConfig {
    /// Maximum model turns per loop call
    pub max_steps: usize,
    /// Token budget for every model call
    pub max_tokens: u32,
    /// Allow executing the same tool more than once per loop call
    pub allow_repeat: bool,
    /// Tools whose successful execution ends the loop
    pub terminal_tools: Vec<String>,
}

impl Default for FileRuntimeConfig {
    fn default() -> Self {
        let defaults = RuntimeConfig::default();
        Self {
            max_steps: defaults.max_steps,
            max_tokens: defaults.max_tokens,
            allow_repeat: defaults.allow_repeat,
            terminal_tools: Vec::new(),
        }
    }
}

/// Raw provider-quirk rules from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Model-name substrings of providers that reject `cache_control`
    pub cache_control_families: Vec<String>,
    /// Exact model names that reject call-id-linked tool turns
    pub unlinked_tool_turn_models: Vec<String>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        let rules = ProviderRules::default();
        Self {
            cache_control_families: rules.cache_control_families,
            unlinked_tool_turn_models: rules.unlinked_tool_turn_models,
        }
    }
}

impl FileProviderConfig {
    pub fn to_rules(&self) -> ProviderRules {
        ProviderRules {
            cache_control_families: self.cache_control_families.clone(),
            unlinked_tool_turn_models: self.unlinked_tool_turn_models.clone(),
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// 0 = warn, 1 = info, 2 = debug, 3+ = trace
    pub verbosity: u8,
    /// JSONL conversation log path; none disables conversation logging
    pub conversation_log: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Loop control
    pub runtime: FileRuntimeConfig,
    /// Provider quirk rules
    pub provider: FileProviderConfig,
    /// Diagnostics and conversation log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.runtime.max_steps == 0 {
            return Err(ConfigValidationError::ZeroMaxSteps);
        }

        if self.runtime.max_tokens == 0 {
            return Err(ConfigValidationError::ZeroMaxTokens);
        }

        if self
            .runtime
            .terminal_tools
            .iter()
            .any(|name| name.trim().is_empty())
        {
            return Err(ConfigValidationError::EmptyTerminalTool);
        }

        Ok(())
    }

    /// Convert into the application's runtime configuration.
    pub fn into_runtime_config(self) -> RuntimeConfig {
        RuntimeConfig {
            max_steps: self.runtime.max_steps,
            max_tokens: self.runtime.max_tokens,
            allow_repeat: self.runtime.allow_repeat,
            terminal_tools: self.runtime.terminal_tools.into_iter().collect(),
            provider: self.provider.to_rules(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[runtime]
max_steps = 4
max_tokens = 2048
allow_repeat = true
terminal_tools = ["submit_order", "adopt_policy"]

[provider]
cache_control_families = ["claude"]
unlinked_tool_turn_models = ["gpt-5", "o4-responses"]

[logging]
verbosity = 2
conversation_log = "logs/run.conversation.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runtime.max_steps, 4);
        assert_eq!(config.runtime.max_tokens, 2048);
        assert!(config.runtime.allow_repeat);
        assert_eq!(config.runtime.terminal_tools.len(), 2);
        assert_eq!(config.provider.cache_control_families, vec!["claude"]);
        assert_eq!(config.logging.verbosity, 2);
        assert_eq!(
            config.logging.conversation_log,
            Some(PathBuf::from("logs/run.conversation.jsonl"))
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[runtime]
terminal_tools = ["submit_order"]
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runtime.max_steps, 8);
        assert_eq!(config.runtime.max_tokens, 8192);
        assert!(!config.runtime.allow_repeat);
        assert_eq!(config.provider, FileProviderConfig::default());
        assert_eq!(config.logging.conversation_log, None);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.provider.cache_control_families,
            vec!["claude", "sonnet", "anthropic"]
        );
        assert_eq!(config.provider.unlinked_tool_turn_models, vec!["gpt-5"]);
    }

    #[test]
    fn test_validate_zero_max_steps() {
        let mut config = FileConfig::default();
        config.runtime.max_steps = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::ZeroMaxSteps));
    }

    #[test]
    fn test_validate_zero_max_tokens() {
        let mut config = FileConfig::default();
        config.runtime.max_tokens = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::ZeroMaxTokens));
    }

    #[test]
    fn test_validate_empty_terminal_tool() {
        let mut config = FileConfig::default();
        config.runtime.terminal_tools = vec!["submit_order".to_string(), "  ".to_string()];
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyTerminalTool)
        );
    }

    #[test]
    fn test_into_runtime_config() {
        let mut config = FileConfig::default();
        config.runtime.max_steps = 3;
        config.runtime.terminal_tools = vec!["submit_order".to_string()];
        config.provider.unlinked_tool_turn_models = vec!["gpt-5".to_string(), "gpt-5-pro".to_string()];

        let runtime = config.into_runtime_config();
        assert_eq!(runtime.max_steps, 3);
        assert!(runtime.is_terminal("submit_order"));
        assert!(!runtime.provider.profile_for("gpt-5-pro").linked_tool_turns);
        assert!(runtime.provider.profile_for("claude-opus").strip_cache_control);
    }
}
