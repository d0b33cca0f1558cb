//! Deterministic thought + reply synthesis for the task-execution daemon.
//!
//! The daemon hands each task to a "model backend" that returns an internal
//! rationale (the *thought*) and a user-facing answer (the *reply*).
//! `taskmind-rs` provides a backend that needs no model at all: the
//! [`Synthesizer`] merges the current goal, an optional chain action and
//! address, recent task history, and knowledge-base snippets into a bounded,
//! human-readable pair of strings.
//!
//! # Getting started
//!
//! ```
//! use taskmind_rs::prelude::*;
//!
//! let synth = Synthesizer::with_clock(
//!     SynthesizerConfig::default(),
//!     FixedClock::at_epoch(0).unwrap(),
//! );
//! let request = BridgeRequest::new("check balance")
//!     .with_chain_action("eth_getBalance")
//!     .with_address("0xabc")
//!     .with_history(vec![
//!         HistoryRecord::new("check balance")
//!             .with_reply("balance is 5 ETH")
//!             .with_created_at(Timestamp::Epoch(0.0)),
//!     ]);
//!
//! let out = synth.synthesize(&request).unwrap();
//! assert!(out.thought.contains("1970-01-01 00:00:00 UTC goal: check balance"));
//! assert!(out.reply.contains("eth_getBalance"));
//! ```
//!
//! # Where to find things
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`request`] | [`BridgeRequest`] and its lenient JSON decoder |
//! | [`synth`] | [`Synthesizer`], the [`ReplyGenerator`] trait, ordered clause assembly |
//! | [`response`] | [`BridgeReply`], [`handle_payload`] and the JSON envelope |
//! | [`knowledge`] | [`StaticKnowledge`] file-backed snippet lookup |
//! | [`clock`] | Injectable [`Clock`] and UTC formatting |
//! | [`config`] | [`SynthesizerConfig`] display limits |
//!
//! The `taskmind-bridge` binary wraps [`handle_payload`]: it reads one JSON
//! request on stdin and writes one JSON object on stdout.

pub mod clock;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod prelude;
pub mod request;
pub mod response;
pub mod synth;
pub mod text;

use schemars::JsonSchema;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::SynthesizerConfig;
pub use error::{BridgeError, ErrorResponse};
pub use knowledge::{Snippet, StaticKnowledge};
pub use request::{BridgeRequest, HistoryRecord, KnowledgeEntry, Timestamp};
pub use response::{BridgeReply, handle_payload, render_outcome};
pub use synth::{ReplyGenerator, Synthesizer};

/// Generate a JSON Schema `serde_json::Value` from a type that implements
/// `schemars::JsonSchema`.
///
/// ```
/// use taskmind_rs::{BridgeRequest, json_schema_for};
///
/// let schema = json_schema_for::<BridgeRequest>();
/// assert_eq!(schema["type"], "object");
/// assert!(schema["required"].as_array().unwrap().contains(&"goal".into()));
/// ```
pub fn json_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}
