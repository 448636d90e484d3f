//! Malformed-JSON recovery for text-embedded tool calls.

use regex::Regex;
use std::sync::LazyLock;

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^```[a-zA-Z0-9_-]*\s*|\s*```$").expect("code fence pattern is valid")
});

static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[\s\S]*\}").expect("object span pattern is valid"));

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("trailing comma pattern is valid"));

/// Recover a single JSON object from raw assistant text.
///
/// Steps:
/// 1. strip leading/trailing code-fence markers
/// 2. take the span from the first `{` to the last `}`
/// 3. if the span does not parse, drop trailing commas before `}` / `]`
/// 4. if that does not parse either, convert single quotes to double quotes
///
/// Returns the repaired text only if it parses; `None` means the text is not
/// a recoverable tool call and should be treated as plain prose. A span that
/// already parses is returned untouched, so running the function on its own
/// output returns that output unchanged.
pub fn recover_json_object(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let unfenced = CODE_FENCE.replace_all(raw, "");
    let span = OBJECT_SPAN.find(&unfenced)?.as_str();
    if parses(span) {
        return Some(span.to_string());
    }

    let candidate = TRAILING_COMMA.replace_all(span, "$1").into_owned();
    // Double-quoted JSON containing apostrophes must not be requoted.
    if parses(&candidate) {
        return Some(candidate);
    }

    let requoted = candidate.replace('\'', "\"");
    parses(&requoted).then_some(requoted)
}

fn parses(candidate: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(candidate).is_ok()
}
