//! Tool adapters
//!
//! Converts tool declarations into the function-tool JSON that models
//! receive (natively, or pretty printed inside the JSON instruction).

mod schema;

pub use schema::JsonSchemaToolConverter;
