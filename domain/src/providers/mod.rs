//! Provider quirks (provider-neutral, serde-free).
//!
//! Some provider APIs reject message shapes that others accept. The runtime
//! resolves a [`ProviderProfile`] from the model's declared name once per
//! loop call and adapts the outgoing transcript before every model call.

use crate::session::entities::{Message, MessageContent};
use std::borrow::Cow;

/// Rules for classifying models into provider families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRules {
    /// Case-insensitive substrings identifying providers that reject
    /// per-block `cache_control` metadata.
    pub cache_control_families: Vec<String>,
    /// Case-insensitive exact model names whose API rejects assistant turns
    /// carrying call-id-linked structured tool calls.
    pub unlinked_tool_turn_models: Vec<String>,
}

impl Default for ProviderRules {
    fn default() -> Self {
        Self {
            cache_control_families: vec![
                "claude".to_string(),
                "sonnet".to_string(),
                "anthropic".to_string(),
            ],
            unlinked_tool_turn_models: vec!["gpt-5".to_string()],
        }
    }
}

impl ProviderRules {
    pub fn profile_for(&self, model_name: &str) -> ProviderProfile {
        let lower = model_name.to_lowercase();
        ProviderProfile {
            strip_cache_control: self
                .cache_control_families
                .iter()
                .any(|family| !family.is_empty() && lower.contains(&family.to_lowercase())),
            linked_tool_turns: !self
                .unlinked_tool_turn_models
                .iter()
                .any(|name| name.eq_ignore_ascii_case(model_name)),
        }
    }
}

/// Message-shape constraints of the provider behind one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderProfile {
    /// Remove `cache_control` from every content block before sending.
    pub strip_cache_control: bool,
    /// Assistant tool calls may be sent as structured, id-linked calls and
    /// tool results may reference the call id.
    pub linked_tool_turns: bool,
}

impl Default for ProviderProfile {
    fn default() -> Self {
        Self {
            strip_cache_control: false,
            linked_tool_turns: true,
        }
    }
}

const CACHE_CONTROL: &str = "cache_control";

/// Adapt a transcript for the provider.
///
/// Borrows the transcript unchanged unless the provider rejects
/// `cache_control`, in which case a copy with that key removed from every
/// content block is returned. The caller's transcript is never modified.
pub fn normalize_messages<'a>(
    messages: &'a [Message],
    profile: &ProviderProfile,
) -> Cow<'a, [Message]> {
    if !profile.strip_cache_control {
        return Cow::Borrowed(messages);
    }

    let mut copy = messages.to_vec();
    for message in &mut copy {
        if let Some(MessageContent::Blocks(blocks)) = &mut message.content {
            for block in blocks.iter_mut() {
                if let Some(map) = block.as_object_mut() {
                    map.remove(CACHE_CONTROL);
                }
            }
        }
    }
    Cow::Owned(copy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cached_user_message() -> Message {
        Message::user(MessageContent::Blocks(vec![
            json!({"type": "text", "text": "context", "cache_control": {"type": "ephemeral"}}),
            json!("plain string block"),
        ]))
    }

    #[test]
    fn test_family_match_is_case_insensitive_substring() {
        let rules = ProviderRules::default();
        assert!(rules.profile_for("Claude-Sonnet-4.5").strip_cache_control);
        assert!(rules.profile_for("azure/anthropic-proxy").strip_cache_control);
        assert!(!rules.profile_for("gpt-4.1").strip_cache_control);
    }

    #[test]
    fn test_unlinked_models_use_exact_match() {
        let rules = ProviderRules::default();
        assert!(!rules.profile_for("gpt-5").linked_tool_turns);
        assert!(!rules.profile_for("GPT-5").linked_tool_turns);
        assert!(rules.profile_for("gpt-5-mini").linked_tool_turns);
    }

    #[test]
    fn test_strip_cache_control_copies() {
        let messages = vec![Message::system("rules"), cached_user_message()];
        let profile = ProviderProfile {
            strip_cache_control: true,
            linked_tool_turns: true,
        };

        let normalized = normalize_messages(&messages, &profile);
        assert!(matches!(normalized, Cow::Owned(_)));
        let Some(MessageContent::Blocks(blocks)) = &normalized[1].content else {
            panic!("expected blocks");
        };
        assert!(blocks[0].get("cache_control").is_none());
        assert_eq!(blocks[0]["text"], "context");
        assert_eq!(blocks[1], json!("plain string block"));

        // Original transcript untouched.
        let Some(MessageContent::Blocks(original)) = &messages[1].content else {
            panic!("expected blocks");
        };
        assert!(original[0].get("cache_control").is_some());
    }

    #[test]
    fn test_passthrough_borrows() {
        let messages = vec![cached_user_message()];
        let normalized = normalize_messages(&messages, &ProviderProfile::default());
        assert!(matches!(normalized, Cow::Borrowed(_)));
        assert_eq!(normalized.as_ref(), messages.as_slice());
    }
}
