//! Error kinds surfaced by the bridge.
//!
//! Only two conditions reject a request: a payload that is not a JSON
//! object, and a missing goal. Everything else in the request degrades to
//! defaults. [`BridgeError::Knowledge`] is reserved for loading the optional
//! static knowledge file and never comes out of synthesis.

use serde::Serialize;

/// Errors produced while decoding, synthesizing, or loading knowledge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// The payload could not be parsed into a structured request.
    #[error("input is not a valid JSON object: {0}")]
    MalformedInput(String),
    /// `goal` is absent or empty after trimming.
    #[error("goal must not be empty")]
    MissingGoal,
    /// The static knowledge file could not be loaded.
    #[error("knowledge base unavailable: {0}")]
    Knowledge(String),
}

/// Wire envelope for failures: `{ "error": "..." }`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&BridgeError> for ErrorResponse {
    fn from(err: &BridgeError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
