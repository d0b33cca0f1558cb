//! End-to-end tests for the JSON boundary.
//!
//! Each test feeds raw request text through `handle_payload` and
//! `render_outcome` exactly as the `taskmind-bridge` binary does, with the
//! clock frozen.

use std::io::Write;

use serde_json::{Value, json};
use taskmind_rs::prelude::*;

fn frozen() -> Synthesizer<FixedClock> {
    Synthesizer::with_clock(
        SynthesizerConfig::default(),
        FixedClock::at_epoch(1_700_000_000).unwrap(),
    )
}

/// Run a request value through the boundary and parse the emitted JSON.
fn run(request: Value) -> Value {
    run_raw(&request.to_string())
}

fn run_raw(raw: &str) -> Value {
    let out = render_outcome(&handle_payload(raw, &frozen(), None));
    serde_json::from_str(&out).unwrap()
}

fn thought_lines(out: &Value) -> Vec<String> {
    out["thought"]
        .as_str()
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

// ── Basic shape ──────────────────────────────────────────────────────

#[test]
fn goal_action_address_example() {
    let out = run(json!({
        "goal": "check balance",
        "chain_action": "eth_getBalance",
        "address": "0xabc",
    }));
    let reply = out["reply"].as_str().unwrap();
    assert!(reply.contains("check balance"));
    assert!(reply.contains("eth_getBalance"));
    assert!(reply.contains("0xabc"));
    assert_eq!(thought_lines(&out).len(), 4);
    assert!(out.get("error").is_none());
}

#[test]
fn bare_goal_uses_placeholders() {
    let out = run(json!({"goal": "stake tokens"}));
    let lines = thought_lines(&out);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "Expected chain action: unspecified");
    assert_eq!(lines[2], "Involved address: unspecified");
    assert_eq!(lines[3], "Timestamp: 2023-11-14 22:13:20 UTC");
    let reply = out["reply"].as_str().unwrap();
    assert!(reply.contains("specify the chain action"));
    assert!(reply.contains("to be determined"));
}

#[test]
fn history_example_at_epoch_zero() {
    let out = run(json!({
        "goal": "check balance again",
        "history": [{"goal": "check balance", "reply": "balance is 5 ETH", "created_at": 0}],
    }));
    let lines = thought_lines(&out);
    assert!(lines.iter().any(|l| l == "Historical reference tasks:"));
    assert!(lines.iter().any(|l| {
        l.contains("1970-01-01 00:00:00 UTC")
            && l.contains("goal: check balance")
            && l.contains("result: balance is 5 ETH")
    }));
    assert!(
        out["reply"]
            .as_str()
            .unwrap()
            .contains("earlier task \"check balance\"")
    );
}

// ── Errors ───────────────────────────────────────────────────────────

#[test]
fn empty_goal_is_an_error_response() {
    for goal in ["", "   "] {
        let out = run(json!({"goal": goal}));
        assert_eq!(out, json!({"error": "goal must not be empty"}));
    }
    let out = run(json!({"address": "0xabc"}));
    assert!(out["error"].is_string());
    assert!(out.get("thought").is_none());
}

#[test]
fn malformed_input_has_distinct_message() {
    let malformed = run_raw("this is not json");
    let not_object = run_raw("[1, 2, 3]");
    let missing = run(json!({"goal": ""}));
    let malformed_msg = malformed["error"].as_str().unwrap();
    assert!(malformed_msg.starts_with("input is not a valid JSON object"));
    assert!(not_object["error"].as_str().unwrap().contains("an array"));
    assert_ne!(malformed_msg, missing["error"].as_str().unwrap());
}

// ── Normalization laws ───────────────────────────────────────────────

#[test]
fn malformed_history_equals_empty_history() {
    let baseline = run(json!({"goal": "g", "history": []}));
    assert_eq!(run(json!({"goal": "g", "history": "not a list"})), baseline);
    assert_eq!(run(json!({"goal": "g", "history": [1, 2, "x"]})), baseline);
    assert_eq!(run(json!({"goal": "g"})), baseline);
}

#[test]
fn malformed_knowledge_equals_empty_knowledge() {
    let baseline = run(json!({"goal": "g"}));
    assert_eq!(run(json!({"goal": "g", "knowledge": {"title": "x"}})), baseline);
    assert_eq!(run(json!({"goal": "g", "knowledge": [null, true, 3.5]})), baseline);
}

#[test]
fn odd_timestamps_degrade_to_unknown() {
    let out = run(json!({
        "goal": "g",
        "history": [
            {"goal": "a", "created_at": true},
            {"goal": "b", "created_at": {"secs": 1}},
            {"goal": "c", "created_at": "2024-01-01 08:00"},
        ],
    }));
    let lines = thought_lines(&out);
    assert!(lines.contains(&"- [1] unknown goal: a | result: no summary".to_string()));
    assert!(lines.contains(&"- [2] unknown goal: b | result: no summary".to_string()));
    assert!(lines.contains(&"- [3] 2024-01-01 08:00 goal: c | result: no summary".to_string()));
}

// ── Bounding and truncation ──────────────────────────────────────────

#[test]
fn sections_list_at_most_three_entries() {
    let history: Vec<Value> = (0..8)
        .map(|i| json!({"goal": format!("task {i}"), "reply": "ok"}))
        .collect();
    let knowledge: Vec<Value> = (0..8)
        .map(|i| json!({"title": format!("note {i}"), "content": "body"}))
        .collect();
    let out = run(json!({"goal": "g", "history": history, "knowledge": knowledge}));
    let lines = thought_lines(&out);
    let entries = lines.iter().filter(|l| l.starts_with("- [")).count();
    assert_eq!(entries, 6);
    assert_eq!(lines.len(), 4 + 2 + 6);
    assert!(lines.iter().any(|l| l.starts_with("- [3] unknown goal: task 2")));
    assert!(lines.iter().any(|l| l == "- [3] note 2: body"));
}

#[test]
fn long_summaries_and_content_are_truncated() {
    let summary = "s".repeat(100);
    let content = "c".repeat(100);
    let out = run(json!({
        "goal": "g",
        "history": [{"goal": "a", "reply": summary}],
        "knowledge": [{"title": "k", "content": content}],
    }));
    let lines = thought_lines(&out);
    let history_line = lines.iter().find(|l| l.starts_with("- [1] unknown")).unwrap();
    let shown = history_line.rsplit("result: ").next().unwrap();
    assert!(shown.ends_with("..."));
    assert_eq!(shown.chars().count(), 60 + 3);

    let knowledge_line = lines.iter().find(|l| l.starts_with("- [1] k: ")).unwrap();
    let shown = knowledge_line.trim_start_matches("- [1] k: ");
    assert!(shown.ends_with("..."));
    assert_eq!(shown.chars().count(), 80 + 3);
}

#[test]
fn observations_back_up_missing_reply() {
    let out = run(json!({
        "goal": "g",
        "history": [{"goal": "a", "reply": "  ", "observations": "eth_getBalance returned 0x10"}],
    }));
    assert!(
        out["thought"]
            .as_str()
            .unwrap()
            .contains("result: eth_getBalance returned 0x10")
    );
}

// ── Determinism ──────────────────────────────────────────────────────

#[test]
fn identical_inputs_are_byte_identical() {
    let raw = json!({
        "goal": "swap tokens",
        "chain_action": "eth_sendTransaction",
        "history": [{"goal": "quote", "reply": "1 ETH = 3000 USDC", "created_at": 1_700_000_000}],
        "knowledge": [{"title": "Slippage", "content": "Set a slippage limit."}],
    })
    .to_string();
    let a = render_outcome(&handle_payload(&raw, &frozen(), None));
    let b = render_outcome(&handle_payload(&raw, &frozen(), None));
    assert_eq!(a, b);
}

// ── Static knowledge ─────────────────────────────────────────────────

#[test]
fn knowledge_file_augments_matching_requests() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let snippets = json!([
        {"title": "Gas", "content": "Gas is priced in gwei.", "keywords": ["gas"]},
        {
            "title": "Balances",
            "content": "Balances are in wei.",
            "keywords": ["balance"],
            "tags": ["wallet"],
        },
    ]);
    write!(file, "{snippets}").unwrap();
    let kb = StaticKnowledge::load(file.path(), 3).unwrap();

    let raw = json!({"goal": "check wallet", "chain_action": "eth_getBalance"}).to_string();
    let out: Value =
        serde_json::from_str(&render_outcome(&handle_payload(&raw, &frozen(), Some(&kb)))).unwrap();
    let thought = out["thought"].as_str().unwrap();
    assert!(thought.contains("Knowledge base references:"));
    assert!(thought.contains("- [1] Balances: Balances are in wei."));
    assert!(!thought.contains("Gas"));
    assert!(out["reply"].as_str().unwrap().contains("\"Balances\""));
}

#[test]
fn request_schema_requires_goal() {
    let schema = taskmind_rs::json_schema_for::<BridgeRequest>();
    let required = schema["required"].as_array().unwrap();
    assert_eq!(required, &vec![Value::from("goal")]);
    assert!(schema["properties"]["history"].is_object());
}
