//! Tool domain module
//!
//! Defines how the runtime sees the tools a model may call, and how it
//! reconciles what the model asked for with what a tool accepts.
//!
//! # Overview
//!
//! ```text
//! ┌────────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │ ToolDefinition │───▶│ SignatureCatalog │───▶│ coerce_arguments │
//! │ (declared)     │    │ (once per loop)  │    │ (once per call)  │
//! └────────────────┘    └──────────────────┘    └────────┬─────────┘
//!                                                        ▼
//!                                              CoercionOutcome + ToolOutcome
//! ```
//!
//! Tools declare their parameters explicitly ([`ToolDefinition`],
//! [`ToolParameter`](entities::ToolParameter)). There is no runtime
//! reflection: the catalog is derived from declarations and is immutable
//! for the lifetime of one loop call.
//!
//! # Key Types
//!
//! - [`ToolCallRequest`]: a call the model asked for on one turn
//! - [`ToolSignature`]: accepted/required parameters of one tool
//! - [`CoercionOutcome`]: corrected arguments plus an audit note
//! - [`ToolError`] / [`ToolOutcome`]: tool failures as values

pub mod coercion;
pub mod entities;
pub mod signature;
pub mod value_objects;

pub use coercion::{CoercionDetail, CoercionOutcome, CoercionReason, coerce_arguments};
pub use entities::{RawArguments, ToolCallRequest, ToolDefinition, ToolParameter};
pub use signature::{SignatureCatalog, ToolSignature};
pub use value_objects::{ToolError, ToolOutcome};
