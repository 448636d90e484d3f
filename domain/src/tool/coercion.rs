//! Argument coercion: reconcile model-supplied arguments with a tool's
//! declared parameters.
//!
//! Models regularly invent plausible-but-wrong argument names or pad calls
//! with extra keys. Coercion never invents values; it only renames or drops
//! keys, and always reports what it did so the transcript can be audited.
//!
//! Policy, first match wins:
//!
//! | Condition | Result | Reason |
//! |-----------|--------|--------|
//! | tool accepts arbitrary arguments | passed through | `var_kw_accepts_any` |
//! | tool declares no parameters | empty mapping | `no_params` |
//! | one param, one supplied key, names differ | key renamed | `single_param_rename` |
//! | otherwise | unknown keys dropped | `keys_removed` / `none` |

use super::signature::ToolSignature;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Why coercion produced the arguments it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionReason {
    None,
    #[serde(rename = "var_kw_accepts_any")]
    AcceptsAny,
    NoParams,
    SingleParamRename,
    KeysRemoved,
}

impl CoercionReason {
    pub fn as_str(&self) -> &str {
        match self {
            CoercionReason::None => "none",
            CoercionReason::AcceptsAny => "var_kw_accepts_any",
            CoercionReason::NoParams => "no_params",
            CoercionReason::SingleParamRename => "single_param_rename",
            CoercionReason::KeysRemoved => "keys_removed",
        }
    }
}

impl std::fmt::Display for CoercionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What exactly was changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoercionDetail {
    Renamed { from: String, to: String },
    Removed { keys: Vec<String> },
}

/// Result of reconciling supplied arguments against a [`ToolSignature`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoercionOutcome {
    pub used_arguments: Map<String, Value>,
    /// True when `used_arguments` differs from what was supplied
    pub coerced: bool,
    pub reason: CoercionReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<CoercionDetail>,
}

impl CoercionOutcome {
    /// Outcome recorded for calls that never reach execution.
    pub fn untouched() -> Self {
        Self {
            used_arguments: Map::new(),
            coerced: false,
            reason: CoercionReason::None,
            detail: None,
        }
    }
}

/// Reconcile `supplied` against `signature`.
pub fn coerce_arguments(signature: &ToolSignature, supplied: &Map<String, Value>) -> CoercionOutcome {
    if signature.accepts_arbitrary {
        return CoercionOutcome {
            used_arguments: supplied.clone(),
            coerced: false,
            reason: CoercionReason::AcceptsAny,
            detail: None,
        };
    }

    if signature.params.is_empty() {
        let removed: Vec<String> = supplied.keys().cloned().collect();
        return CoercionOutcome {
            used_arguments: Map::new(),
            coerced: !removed.is_empty(),
            reason: CoercionReason::NoParams,
            detail: (!removed.is_empty()).then_some(CoercionDetail::Removed { keys: removed }),
        };
    }

    if let ([param], Some((key, value))) = (signature.params.as_slice(), single_entry(supplied))
        && key != param
    {
        let mut used = Map::new();
        used.insert(param.clone(), value.clone());
        return CoercionOutcome {
            used_arguments: used,
            coerced: true,
            reason: CoercionReason::SingleParamRename,
            detail: Some(CoercionDetail::Renamed {
                from: key.clone(),
                to: param.clone(),
            }),
        };
    }

    let mut used = Map::new();
    let mut removed = Vec::new();
    for (key, value) in supplied {
        if signature.accepts(key) {
            used.insert(key.clone(), value.clone());
        } else {
            removed.push(key.clone());
        }
    }

    if removed.is_empty() {
        CoercionOutcome {
            used_arguments: used,
            coerced: false,
            reason: CoercionReason::None,
            detail: None,
        }
    } else {
        CoercionOutcome {
            used_arguments: used,
            coerced: true,
            reason: CoercionReason::KeysRemoved,
            detail: Some(CoercionDetail::Removed { keys: removed }),
        }
    }
}

fn single_entry(map: &Map<String, Value>) -> Option<(&String, &Value)> {
    if map.len() == 1 { map.iter().next() } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signature(params: &[&str], accepts_arbitrary: bool) -> ToolSignature {
        ToolSignature {
            name: "tool".to_string(),
            params: params.iter().map(|p| p.to_string()).collect(),
            required: params.iter().map(|p| p.to_string()).collect(),
            accepts_arbitrary,
        }
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_single_param_rename() {
        let outcome = coerce_arguments(&signature(&["option_id"], false), &args(json!({"id": "X"})));
        assert_eq!(outcome.used_arguments, args(json!({"option_id": "X"})));
        assert!(outcome.coerced);
        assert_eq!(outcome.reason, CoercionReason::SingleParamRename);
        assert_eq!(
            outcome.detail,
            Some(CoercionDetail::Renamed {
                from: "id".to_string(),
                to: "option_id".to_string()
            })
        );
    }

    #[test]
    fn test_accepts_any_passes_through() {
        let supplied = args(json!({"anything": 1, "else": [true]}));
        let outcome = coerce_arguments(&signature(&["a"], true), &supplied);
        assert_eq!(outcome.used_arguments, supplied);
        assert!(!outcome.coerced);
        assert_eq!(outcome.reason, CoercionReason::AcceptsAny);
    }

    #[test]
    fn test_no_params_discards_keys() {
        let outcome = coerce_arguments(&signature(&[], false), &args(json!({"x": 1})));
        assert!(outcome.used_arguments.is_empty());
        assert_eq!(outcome.reason, CoercionReason::NoParams);
        assert_eq!(
            outcome.detail,
            Some(CoercionDetail::Removed {
                keys: vec!["x".to_string()]
            })
        );

        let empty = coerce_arguments(&signature(&[], false), &Map::new());
        assert!(!empty.coerced);
        assert!(empty.detail.is_none());
    }

    #[test]
    fn test_matching_single_param_is_untouched() {
        let supplied = args(json!({"option_id": "A"}));
        let outcome = coerce_arguments(&signature(&["option_id"], false), &supplied);
        assert_eq!(outcome.used_arguments, supplied);
        assert!(!outcome.coerced);
        assert_eq!(outcome.reason, CoercionReason::None);
    }

    #[test]
    fn test_extra_keys_removed() {
        let outcome = coerce_arguments(
            &signature(&["applicant_id", "decision"], false),
            &args(json!({"applicant_id": "A1", "decision": "ADMIT", "why": "because"})),
        );
        assert_eq!(
            outcome.used_arguments,
            args(json!({"applicant_id": "A1", "decision": "ADMIT"}))
        );
        assert_eq!(outcome.reason, CoercionReason::KeysRemoved);
        assert_eq!(
            outcome.detail,
            Some(CoercionDetail::Removed {
                keys: vec!["why".to_string()]
            })
        );
    }

    #[test]
    fn test_single_param_with_two_keys_filters() {
        let outcome = coerce_arguments(
            &signature(&["option_id"], false),
            &args(json!({"id": "X", "option_id": "Y"})),
        );
        assert_eq!(outcome.used_arguments, args(json!({"option_id": "Y"})));
        assert_eq!(outcome.reason, CoercionReason::KeysRemoved);
    }

    #[test]
    fn test_reason_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(CoercionReason::AcceptsAny).unwrap(),
            json!("var_kw_accepts_any")
        );
        assert_eq!(
            serde_json::to_value(CoercionReason::SingleParamRename).unwrap(),
            json!("single_param_rename")
        );
        assert_eq!(CoercionReason::KeysRemoved.to_string(), "keys_removed");
    }
}
