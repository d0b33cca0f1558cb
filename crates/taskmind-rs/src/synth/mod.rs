//! The reply synthesizer.
//!
//! [`Synthesizer`] merges a goal with prior task history and knowledge
//! snippets into a deterministic thought trace and a one-paragraph reply,
//! standing in for a language-model backend. It performs no I/O; the only
//! outside input is the injected [`Clock`].
//!
//! ```
//! use taskmind_rs::{BridgeRequest, FixedClock, Synthesizer, SynthesizerConfig};
//!
//! let clock = FixedClock::at_epoch(0).unwrap();
//! let synth = Synthesizer::with_clock(SynthesizerConfig::default(), clock);
//! let out = synth
//!     .synthesize(&BridgeRequest::new("check balance").with_chain_action("eth_getBalance"))
//!     .unwrap();
//! assert_eq!(out.thought.lines().count(), 4);
//! assert!(out.reply.contains("eth_getBalance"));
//! ```

pub mod clause;
pub mod reply;
pub mod thought;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::SynthesizerConfig;
use crate::error::BridgeError;
use crate::request::BridgeRequest;
use crate::response::BridgeReply;
use clause::{SynthesisContext, assemble};

/// Anything that turns a request into a thought + reply pair.
///
/// The daemon talks to model backends through this trait; [`Synthesizer`]
/// is the deterministic stand-in.
pub trait ReplyGenerator: Send + Sync {
    fn generate(&self, request: &BridgeRequest) -> Result<BridgeReply, BridgeError>;
}

/// Deterministic thought + reply synthesizer.
#[derive(Debug, Clone)]
pub struct Synthesizer<C: Clock = SystemClock> {
    config: SynthesizerConfig,
    clock: C,
}

impl Synthesizer<SystemClock> {
    pub fn new(config: SynthesizerConfig) -> Self {
        Self {
            config,
            clock: SystemClock,
        }
    }
}

impl Default for Synthesizer<SystemClock> {
    fn default() -> Self {
        Self::new(SynthesizerConfig::default())
    }
}

impl<C: Clock> Synthesizer<C> {
    pub fn with_clock(config: SynthesizerConfig, clock: C) -> Self {
        Self { config, clock }
    }

    /// Build the thought trace and reply for `request`.
    ///
    /// Fails only with [`BridgeError::MissingGoal`] when the goal is empty
    /// after trimming.
    pub fn synthesize(&self, request: &BridgeRequest) -> Result<BridgeReply, BridgeError> {
        if request.goal.trim().is_empty() {
            return Err(BridgeError::MissingGoal);
        }

        let ctx = SynthesisContext {
            request,
            config: &self.config,
            now: self.clock.now(),
        };
        debug!(
            history = ctx.history().len(),
            knowledge = ctx.knowledge().len(),
            "synthesizing reply"
        );

        Ok(BridgeReply {
            thought: assemble(thought::THOUGHT_CLAUSES, &ctx, "\n"),
            reply: assemble(reply::REPLY_CLAUSES, &ctx, " "),
        })
    }
}

impl<C: Clock> ReplyGenerator for Synthesizer<C> {
    fn generate(&self, request: &BridgeRequest) -> Result<BridgeReply, BridgeError> {
        self.synthesize(request)
    }
}
