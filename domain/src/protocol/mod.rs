//! Text-embedded tool-call protocol.
//!
//! Models without native function calling are asked to answer each turn
//! with a single JSON object `{"name": ..., "args": {...}}`. Real output is
//! rarely that clean: it arrives wrapped in code fences, prefixed with
//! chatter, with trailing commas or single-quoted strings. This module
//! recovers the object and turns it into a [`ToolCallRequest`](crate::tool::entities::ToolCallRequest).

pub mod embedded_call;
pub mod json_recovery;

pub use embedded_call::{EmbeddedCall, parse_embedded_call};
pub use json_recovery::recover_json_object;
