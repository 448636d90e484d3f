//! Conversation domain.
//!
//! - [`entities::Message`]: a single message within a transcript
//! - [`response::ModelResponse`]: one model generation and the output reader

pub mod entities;
pub mod response;
