//! Receipt extraction for terminal tools.

use serde_json::Value;

/// Fields checked, in order, by the native function-calling protocol.
pub const NATIVE_RECEIPT_FIELDS: &[&str] = &["receipt", "adoption_receipt", "message", "text"];

/// Fields checked, in order, by the text-embedded JSON protocol.
pub const EMBEDDED_RECEIPT_FIELDS: &[&str] = &["receipt", "message", "text"];

/// Human-readable receipt from a successful terminal tool result.
///
/// The first field in `fields` holding a non-empty value wins: text is
/// returned as-is, an object is serialized. Anything else (no such field,
/// or a number/list) falls back to serializing the whole result.
pub fn extract_receipt(result: &Value, fields: &[&str]) -> String {
    let candidate = fields
        .iter()
        .filter_map(|field| result.get(*field))
        .find(|value| is_present(value));

    match candidate {
        Some(Value::String(text)) => text.clone(),
        Some(object @ Value::Object(_)) => object.to_string(),
        _ => result.to_string(),
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_receipt_is_serialized() {
        let result = json!({"ok": true, "receipt": {"id": "abc"}});
        let text = extract_receipt(&result, NATIVE_RECEIPT_FIELDS);
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), json!({"id": "abc"}));
    }

    #[test]
    fn test_field_priority() {
        let result = json!({"ok": true, "receipt": "", "adoption_receipt": "R-1", "message": "m"});
        assert_eq!(extract_receipt(&result, NATIVE_RECEIPT_FIELDS), "R-1");
        // The embedded protocol does not look at adoption_receipt.
        assert_eq!(extract_receipt(&result, EMBEDDED_RECEIPT_FIELDS), "m");
    }

    #[test]
    fn test_fallback_to_whole_result() {
        let result = json!({"ok": true, "status": "done"});
        let text = extract_receipt(&result, EMBEDDED_RECEIPT_FIELDS);
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), result);

        let numeric = json!({"ok": true, "receipt": 17});
        let text = extract_receipt(&numeric, NATIVE_RECEIPT_FIELDS);
        assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), numeric);
    }
}
