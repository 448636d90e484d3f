//! Agent loop domain module
//!
//! Records and results produced by the tool-call loop, plus receipt
//! extraction for terminal tools.

pub mod invocation;
pub mod receipt;

pub use invocation::{InvocationDisposition, LoopExit, LoopResult, ToolInvocationRecord};
pub use receipt::{EMBEDDED_RECEIPT_FIELDS, NATIVE_RECEIPT_FIELDS, extract_receipt};
