//! Shared utility functions.

use serde_json::Value;

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Returns a sub-slice of the original string. If the string is shorter than
/// `max_bytes`, the entire string is returned unchanged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Compact one-line preview of a JSON value for log fields.
pub fn preview_json(value: &Value, max_bytes: usize) -> String {
    let rendered = value.to_string();
    let cut = truncate_str(&rendered, max_bytes);
    if cut.len() < rendered.len() {
        format!("{}…", cut)
    } else {
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_str("adopt_policy", 5), "adopt");
    }

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_str("ok", 10), "ok");
    }

    #[test]
    fn truncate_multibyte_boundary() {
        // 'の' is 3 bytes, cutting at 4 must back up to 3
        let s = "あのね";
        assert_eq!(truncate_str(s, 4), "あ");
        assert_eq!(truncate_str(s, 6), "あの");
    }

    #[test]
    fn preview_short_value_is_verbatim() {
        assert_eq!(preview_json(&json!({"ok": true}), 40), r#"{"ok":true}"#);
    }

    #[test]
    fn preview_long_value_is_marked() {
        let preview = preview_json(&json!({"text": "x".repeat(100)}), 20);
        assert!(preview.ends_with('…'));
        assert!(preview.len() <= 20 + '…'.len_utf8());
    }
}
