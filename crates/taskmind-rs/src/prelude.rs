//! Convenience re-exports for the common case.
//!
//! ```ignore
//! use taskmind_rs::prelude::*;
//! ```

pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::config::SynthesizerConfig;
pub use crate::error::BridgeError;
pub use crate::knowledge::StaticKnowledge;
pub use crate::request::{BridgeRequest, HistoryRecord, KnowledgeEntry, Timestamp};
pub use crate::response::{BridgeReply, handle_payload, render_outcome};
pub use crate::synth::{ReplyGenerator, Synthesizer};
