//! Recovery of JSON values from free-form model output.
//!
//! Model responses are expected to carry one JSON object but routinely arrive
//! wrapped in markdown fences or surrounded by prose. Recovery never fails: when
//! nothing usable can be decoded the result is an empty object, and callers
//! carry on with whatever fields are present.

use serde_json::{Map, Value};

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Which stage produced a recovered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStage {
    /// Decoded from the first `{` or `[` to the end of the text.
    Direct,
    /// Decoded from the leftmost `{` to the rightmost `}`.
    GreedySpan,
    /// Nothing decoded; the value is `{}`.
    Fallback,
}

impl std::fmt::Display for RecoveryStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecoveryStage::Direct => "direct",
            RecoveryStage::GreedySpan => "greedy_span",
            RecoveryStage::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// A recovered value together with the stage that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recovery {
    pub value: Value,
    pub stage: RecoveryStage,
}

impl Recovery {
    pub fn is_fallback(&self) -> bool {
        self.stage == RecoveryStage::Fallback
    }
}

/// Recover a JSON object or array from model output, or `{}`.
pub fn recover_json(text: &str) -> Value {
    recover_json_traced(text).value
}

/// Same as [`recover_json`], also reporting which stage succeeded.
pub fn recover_json_traced(text: &str) -> Recovery {
    let stripped = strip_fences(text);

    let start = stripped.find(['{', '[']).unwrap_or(0);
    if let Some(value) = decode_structured(&stripped[start..]) {
        return Recovery {
            value,
            stage: RecoveryStage::Direct,
        };
    }

    if let Some(value) = greedy_object_span(&stripped).and_then(decode_structured) {
        return Recovery {
            value,
            stage: RecoveryStage::GreedySpan,
        };
    }

    Recovery {
        value: Value::Object(Map::new()),
        stage: RecoveryStage::Fallback,
    }
}

/// Drop every code fence marker (with an optional `json` tag) and the whitespace
/// that follows it, then trim.
pub(crate) fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text.trim();

    while let Some(idx) = rest.find(FENCE) {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + FENCE.len()..];
        rest = rest.strip_prefix(JSON_TAG).unwrap_or(rest);
        rest = rest.trim_start();
    }
    out.push_str(rest);

    out.trim().to_string()
}

/// Leftmost `{` through rightmost `}`. Not nesting-aware: two sibling objects
/// produce one span covering both.
fn greedy_object_span(text: &str) -> Option<&str> {
    let open = text.find('{')?;
    let close = text.rfind('}')?;
    (close > open).then(|| &text[open..=close])
}

/// Decode the whole slice; only objects and arrays count as recovered.
fn decode_structured(candidate: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => Some(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_fences_with_language_tag() {
        assert_eq!(strip_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_fences("  ```\n[1, 2]\n```  "), "[1, 2]");
        assert_eq!(strip_fences("no fences here"), "no fences here");
    }

    #[test]
    fn test_strip_fences_keeps_spaced_tag_text() {
        // Only a tag glued to the fence is removed.
        assert_eq!(strip_fences("``` json {}"), "json {}");
    }

    #[test]
    fn test_direct_stage_for_clean_output() {
        let recovery = recover_json_traced("{\"destination\":\"Goa, India\"}");
        assert_eq!(recovery.stage, RecoveryStage::Direct);
        assert_eq!(recovery.value, json!({"destination": "Goa, India"}));
    }

    #[test]
    fn test_direct_stage_skips_leading_prose() {
        let recovery = recover_json_traced("Sure! Here is the plan:\n{\"day\": 1}");
        assert_eq!(recovery.stage, RecoveryStage::Direct);
        assert_eq!(recovery.value, json!({"day": 1}));
    }

    #[test]
    fn test_greedy_stage_for_trailing_prose() {
        let recovery = recover_json_traced("Here you go: {\"a\": {\"b\": 2}} Hope that helps!");
        assert_eq!(recovery.stage, RecoveryStage::GreedySpan);
        assert_eq!(recovery.value, json!({"a": {"b": 2}}));
    }

    #[test]
    fn test_arrays_are_recovered() {
        assert_eq!(recover_json("```json\n[{\"x\":1}]\n```"), json!([{"x": 1}]));
    }

    #[test]
    fn test_primitives_are_not_recovered() {
        assert_eq!(recover_json("42"), json!({}));
        assert_eq!(recover_json("\"just text\""), json!({}));
        assert_eq!(recover_json("true"), json!({}));
    }

    #[test]
    fn test_sibling_objects_fall_back() {
        let recovery = recover_json_traced("{\"a\":1} {\"b\":2}");
        assert!(recovery.is_fallback());
        assert_eq!(recovery.value, json!({}));
    }

    #[test]
    fn test_truncated_output_falls_back() {
        let recovery = recover_json_traced("{\"itinerary\": [{\"day\": 1, \"activities\": [");
        assert!(recovery.is_fallback());
    }

    #[test]
    fn test_close_before_open_has_no_span() {
        assert_eq!(greedy_object_span("} then {"), None);
        assert_eq!(recover_json("} then {"), json!({}));
    }
}
