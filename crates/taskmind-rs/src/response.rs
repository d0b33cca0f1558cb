//! The JSON boundary: raw request text in, one JSON object out.

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{BridgeError, ErrorResponse};
use crate::knowledge::StaticKnowledge;
use crate::request::{BridgeRequest, KnowledgeEntry};
use crate::synth::ReplyGenerator;

/// Synthesized output: `{ "thought": "...", "reply": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeReply {
    /// Multi-line rationale trace.
    pub thought: String,
    /// User-facing answer.
    pub reply: String,
}

/// Decode `raw`, attach matching static knowledge, and generate a reply.
///
/// Snippets from `knowledge` are appended after any entries the caller
/// already supplied, so caller-provided knowledge keeps priority.
pub fn handle_payload(
    raw: &str,
    generator: &dyn ReplyGenerator,
    knowledge: Option<&StaticKnowledge>,
) -> Result<BridgeReply, BridgeError> {
    let mut request = BridgeRequest::from_json_str(raw)?;
    if let Some(kb) = knowledge {
        let extra: Vec<KnowledgeEntry> = kb
            .query(&request.goal, &request.chain_action)
            .into_iter()
            .map(KnowledgeEntry::from)
            .collect();
        debug!("[bridge] attaching {} static knowledge entries", extra.len());
        request.knowledge.extend(extra);
    }
    generator.generate(&request)
}

/// Serialize an outcome as the single JSON object written to the caller.
pub fn render_outcome(outcome: &Result<BridgeReply, BridgeError>) -> String {
    let value = match outcome {
        Ok(reply) => serde_json::to_value(reply),
        Err(err) => {
            warn!("[bridge] rejecting request: {err}");
            serde_json::to_value(ErrorResponse::from(err))
        }
    };
    value
        .unwrap_or_else(|e| serde_json::json!({ "error": format!("failed to encode output: {e}") }))
        .to_string()
}
