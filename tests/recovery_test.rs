use serde_json::{json, Value};
use wandr::{recover_json, recover_json_traced, RecoveryStage};

fn samples() -> Vec<Value> {
    vec![
        json!({}),
        json!({ "destination": "Kyoto, Japan", "duration_days": 4 }),
        json!({ "itinerary": [{ "day": 1, "activities": [{ "name": "Fushimi Inari" }] }] }),
        json!([1, 2, { "nested": [true, null] }]),
    ]
}

#[test]
fn test_wrapped_values_recover_exactly() {
    let wrappers: [fn(&str) -> String; 4] = [
        |s| s.to_string(),
        |s| format!("```json\n{s}\n```"),
        |s| format!("```\n{s}\n```"),
        |s| format!("Here you go:\n\n{s}"),
    ];

    for value in samples() {
        let body = serde_json::to_string_pretty(&value).unwrap();
        for wrap in wrappers {
            let text = wrap(&body);
            assert_eq!(recover_json(&text), value, "input: {text}");
        }
    }
}

#[test]
fn test_trailing_prose_uses_greedy_span() {
    let text = "Plan below.\n{\"trip_title\": \"Goa Getaway\"}\nHave fun!";
    let recovery = recover_json_traced(text);
    assert_eq!(recovery.stage, RecoveryStage::GreedySpan);
    assert_eq!(recovery.value, json!({ "trip_title": "Goa Getaway" }));
}

#[test]
fn test_inputs_without_structure_fall_back() {
    for text in ["", "   ", "I could not plan that trip.", "42", "\"just a string\"", "```json\n```"] {
        let recovery = recover_json_traced(text);
        assert!(recovery.is_fallback(), "input: {text:?}");
        assert_eq!(recovery.value, json!({}));
    }
}

#[test]
fn test_sibling_objects_are_not_split() {
    assert_eq!(recover_json("{\"a\":1} and {\"b\":2}"), json!({}));
}

#[test]
fn test_closing_brace_inside_string_value() {
    let text = "Result: {\"note\": \"mind the } in here\", \"n\": 1} thanks";
    assert_eq!(
        recover_json(text),
        json!({ "note": "mind the } in here", "n": 1 })
    );
}

#[test]
fn test_open_brace_inside_string_decodes_directly() {
    let recovery = recover_json_traced("{\"note\": \"open { here\"}");
    assert_eq!(recovery.stage, RecoveryStage::Direct);
    assert_eq!(recovery.value, json!({ "note": "open { here" }));
}

#[test]
fn test_open_brace_inside_string_before_prose() {
    let recovery = recover_json_traced("{\"note\": \"open { here\"}\nLet me know if you need changes.");
    assert_eq!(recovery.stage, RecoveryStage::GreedySpan);
    assert_eq!(recovery.value, json!({ "note": "open { here" }));
}

#[test]
fn test_large_integers_keep_their_digits() {
    let text = "```json\n{\"n\": 123456789012345678901234567890, \"x\": 0.1}\n```";
    let value = recover_json(text);

    assert_eq!(
        value.to_string(),
        "{\"n\":123456789012345678901234567890,\"x\":0.1}"
    );
    let original: Value =
        serde_json::from_str("{\"n\": 123456789012345678901234567890, \"x\": 0.1}").unwrap();
    assert_eq!(value, original);
}

#[test]
fn test_truncated_output_falls_back() {
    let text = "```json\n{\"itinerary\": [{\"day\": 1, \"activities\": [";
    assert_eq!(recover_json(text), json!({}));
}

#[test]
fn test_same_input_gives_same_output() {
    let inputs = [
        "```json\n{\"a\": {\"b\": [1, 2]}}\n```",
        "prefix {\"x\": \"y\"} suffix",
        "{\"a\":1} {\"b\":2}",
        "",
        "nothing here",
    ];
    for text in inputs {
        assert_eq!(recover_json(text), recover_json(text), "input: {text:?}");
        assert_eq!(recover_json_traced(text), recover_json_traced(text), "input: {text:?}");
    }
}

#[test]
fn test_recovered_value_recovers_to_itself() {
    let inputs = [
        "```json\n{\"a\": {\"b\": [1, 2]}}\n```",
        "prefix {\"x\": \"y\"} suffix",
        "nothing here",
        "[{\"day\": 1}]",
    ];
    for text in inputs {
        let once = recover_json(text);
        let twice = recover_json(&once.to_string());
        assert_eq!(once, twice, "input: {text}");
    }
}
