//! Ordered, conditional text clauses.
//!
//! A [`Clause`] pairs a condition with a renderer. [`assemble`] walks a fixed
//! slice of clauses in order and appends the rendered text of every clause
//! whose condition holds, so the output order is the slice order and never
//! depends on which optional inputs were present.

use chrono::{DateTime, Utc};

use crate::config::SynthesizerConfig;
use crate::request::{BridgeRequest, HistoryRecord, KnowledgeEntry};

/// Everything a clause may look at while rendering.
#[derive(Debug, Clone)]
pub struct SynthesisContext<'a> {
    pub request: &'a BridgeRequest,
    pub config: &'a SynthesizerConfig,
    pub now: DateTime<Utc>,
}

impl<'a> SynthesisContext<'a> {
    /// History records within the configured limit, in caller order.
    pub fn history(&self) -> &'a [HistoryRecord] {
        let history = &self.request.history;
        &history[..history.len().min(self.config.history_limit)]
    }

    /// Knowledge entries within the configured limit, in caller order.
    pub fn knowledge(&self) -> &'a [KnowledgeEntry] {
        let knowledge = &self.request.knowledge;
        &knowledge[..knowledge.len().min(self.config.knowledge_limit)]
    }

    pub fn has_history(&self) -> bool {
        !self.history().is_empty()
    }

    pub fn has_knowledge(&self) -> bool {
        !self.knowledge().is_empty()
    }
}

/// A named piece of output that is rendered only when its condition holds.
#[derive(Clone, Copy)]
pub struct Clause {
    pub name: &'static str,
    pub condition: fn(&SynthesisContext<'_>) -> bool,
    pub render: fn(&SynthesisContext<'_>) -> String,
}

impl std::fmt::Debug for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clause").field("name", &self.name).finish()
    }
}

/// Condition for clauses that always apply.
pub fn always(_: &SynthesisContext<'_>) -> bool {
    true
}

/// Render every applicable clause in order, joined by `separator`. Clauses
/// that render to an empty string are skipped.
pub fn assemble(clauses: &[Clause], ctx: &SynthesisContext<'_>, separator: &str) -> String {
    clauses
        .iter()
        .filter(|clause| (clause.condition)(ctx))
        .map(|clause| (clause.render)(ctx))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_for<'a>(
        request: &'a BridgeRequest,
        config: &'a SynthesizerConfig,
    ) -> SynthesisContext<'a> {
        SynthesisContext {
            request,
            config,
            now: DateTime::from_timestamp(0, 0).unwrap(),
        }
    }

    fn first(_: &SynthesisContext<'_>) -> String {
        "first".into()
    }

    fn second(_: &SynthesisContext<'_>) -> String {
        "second".into()
    }

    fn never(_: &SynthesisContext<'_>) -> bool {
        false
    }

    fn empty(_: &SynthesisContext<'_>) -> String {
        String::new()
    }

    #[test]
    fn clauses_render_in_slice_order() {
        let req = BridgeRequest::new("g");
        let config = SynthesizerConfig::default();
        let clauses = [
            Clause {
                name: "a",
                condition: always,
                render: first,
            },
            Clause {
                name: "b",
                condition: always,
                render: second,
            },
        ];
        assert_eq!(assemble(&clauses, &ctx_for(&req, &config), "|"), "first|second");
    }

    #[test]
    fn false_condition_and_empty_text_are_skipped() {
        let req = BridgeRequest::new("g");
        let config = SynthesizerConfig::default();
        let clauses = [
            Clause {
                name: "hidden",
                condition: never,
                render: first,
            },
            Clause {
                name: "blank",
                condition: always,
                render: empty,
            },
            Clause {
                name: "shown",
                condition: always,
                render: second,
            },
        ];
        assert_eq!(assemble(&clauses, &ctx_for(&req, &config), "\n"), "second");
    }

    #[test]
    fn limits_bound_history_and_knowledge() {
        let req = BridgeRequest::new("g")
            .with_history((0..5).map(|i| HistoryRecord::new(format!("t{i}"))).collect())
            .with_knowledge(vec![KnowledgeEntry::new("k", "c")]);
        let config = SynthesizerConfig::default().with_knowledge_limit(0);
        let ctx = ctx_for(&req, &config);
        assert_eq!(ctx.history().len(), 3);
        assert_eq!(ctx.history()[0].goal, "t0");
        assert!(!ctx.has_knowledge());
    }
}
