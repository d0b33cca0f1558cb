//! Request value types and the lenient boundary decoder.
//!
//! The daemon sends whatever its task store produced, so decoding is
//! forgiving: only a non-object payload is rejected. Numbers and booleans in
//! `goal`, `chain_action` and `address` are taken as their JSON text; any
//! other wrong-typed field is treated as absent. `history`/`knowledge` that
//! are not arrays become empty, and array elements that are not objects are
//! dropped.
//!
//! ```
//! use taskmind_rs::BridgeRequest;
//!
//! let req = BridgeRequest::from_json_str(
//!     r#"{"goal": " check balance ", "history": [1, {"goal": "prior"}], "knowledge": "oops"}"#,
//! )
//! .unwrap();
//! assert_eq!(req.goal, "check balance");
//! assert_eq!(req.history.len(), 1);
//! assert!(req.knowledge.is_empty());
//! ```

use schemars::JsonSchema;
use serde_json::{Map, Value};

use crate::clock::format_epoch;
use crate::error::BridgeError;

/// Rendering of a history timestamp that is absent or unusable.
pub const UNKNOWN_TIME: &str = "unknown";

/// One synthesis request. All strings are trimmed at decode time; an empty
/// string means "not provided".
#[derive(Debug, Clone, Default, PartialEq, JsonSchema)]
pub struct BridgeRequest {
    /// Natural-language objective. Required and non-empty.
    pub goal: String,
    /// On-chain operation the task may perform, e.g. `eth_getBalance`.
    #[serde(default)]
    pub chain_action: String,
    /// Chain address, opaque to the synthesizer.
    #[serde(default)]
    pub address: String,
    /// Prior tasks, most recent first.
    #[serde(default)]
    pub history: Vec<HistoryRecord>,
    /// Knowledge-base snippets.
    #[serde(default)]
    pub knowledge: Vec<KnowledgeEntry>,
}

/// A previously completed task.
#[derive(Debug, Clone, Default, PartialEq, JsonSchema)]
pub struct HistoryRecord {
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub reply: String,
    #[serde(default)]
    pub observations: String,
    #[serde(default)]
    pub created_at: Timestamp,
}

/// A titled snippet from a knowledge base.
#[derive(Debug, Clone, Default, PartialEq, JsonSchema)]
pub struct KnowledgeEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// When a history record was created.
#[derive(Debug, Clone, Default, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum Timestamp {
    /// Unix epoch seconds, possibly fractional.
    Epoch(f64),
    /// A pre-formatted timestamp, rendered verbatim.
    Text(String),
    #[default]
    Unknown,
}

impl Timestamp {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => n.as_f64().map_or(Self::Unknown, Self::Epoch),
            Some(Value::String(s)) if !s.trim().is_empty() => Self::Text(s.clone()),
            _ => Self::Unknown,
        }
    }

    /// Render for the thought trace: epochs as `YYYY-MM-DD HH:MM:SS UTC`,
    /// text verbatim, everything else as [`UNKNOWN_TIME`].
    pub fn render(&self) -> String {
        match self {
            Self::Epoch(epoch) => format_epoch(*epoch).unwrap_or_else(|| UNKNOWN_TIME.to_string()),
            Self::Text(text) => text.clone(),
            Self::Unknown => UNKNOWN_TIME.to_string(),
        }
    }
}

impl BridgeRequest {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into().trim().to_string(),
            ..Default::default()
        }
    }

    pub fn with_chain_action(mut self, action: impl Into<String>) -> Self {
        self.chain_action = action.into().trim().to_string();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into().trim().to_string();
        self
    }

    pub fn with_history(mut self, history: Vec<HistoryRecord>) -> Self {
        self.history = history;
        self
    }

    pub fn with_knowledge(mut self, knowledge: Vec<KnowledgeEntry>) -> Self {
        self.knowledge = knowledge;
        self
    }

    /// Parse raw JSON text. Invalid JSON is [`BridgeError::MalformedInput`].
    pub fn from_json_str(raw: &str) -> Result<Self, BridgeError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| BridgeError::MalformedInput(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Decode an already-parsed JSON value. Anything other than an object is
    /// [`BridgeError::MalformedInput`]; an empty goal is left for the
    /// synthesizer to reject.
    pub fn from_value(value: &Value) -> Result<Self, BridgeError> {
        let obj = value.as_object().ok_or_else(|| {
            BridgeError::MalformedInput(format!("expected an object, got {}", kind_of(value)))
        })?;

        Ok(Self {
            goal: scalar_field(obj, "goal"),
            chain_action: scalar_field(obj, "chain_action"),
            address: scalar_field(obj, "address"),
            history: records(obj, "history", HistoryRecord::from_object),
            knowledge: records(obj, "knowledge", KnowledgeEntry::from_object),
        })
    }
}

impl HistoryRecord {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into().trim().to_string(),
            ..Default::default()
        }
    }

    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = reply.into().trim().to_string();
        self
    }

    pub fn with_observations(mut self, observations: impl Into<String>) -> Self {
        self.observations = observations.into().trim().to_string();
        self
    }

    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            goal: string_field(obj, "goal"),
            reply: string_field(obj, "reply"),
            observations: string_field(obj, "observations"),
            created_at: Timestamp::from_value(obj.get("created_at")),
        }
    }

    /// `reply` if present, else `observations`, else `None`.
    pub fn summary(&self) -> Option<&str> {
        [self.reply.as_str(), self.observations.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
    }
}

impl KnowledgeEntry {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into().trim().to_string(),
            content: content.into().trim().to_string(),
        }
    }

    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            title: string_field(obj, "title"),
            content: string_field(obj, "content"),
        }
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Like [`string_field`], but numbers and booleans keep their JSON text, so
/// `{"goal": 42}` is the goal `"42"`.
fn scalar_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => String::new(),
    }
}

fn records<T>(obj: &Map<String, Value>, key: &str, decode: fn(&Map<String, Value>) -> T) -> Vec<T> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_object).map(decode).collect())
        .unwrap_or_default()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
