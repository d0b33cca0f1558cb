//! The multi-line rationale trace.

use super::clause::{Clause, SynthesisContext, always};
use crate::clock::format_utc;
use crate::text::truncate_chars;

/// Placeholder for an empty action or address.
pub const UNSPECIFIED: &str = "unspecified";
pub const HISTORY_HEADER: &str = "Historical reference tasks:";
pub const KNOWLEDGE_HEADER: &str = "Knowledge base references:";
pub const UNTITLED: &str = "untitled";
pub const NO_SUMMARY: &str = "no summary";
pub const NO_DETAIL: &str = "no detail available";

pub(crate) const THOUGHT_CLAUSES: &[Clause] = &[
    Clause {
        name: "goal",
        condition: always,
        render: goal_line,
    },
    Clause {
        name: "chain_action",
        condition: always,
        render: action_line,
    },
    Clause {
        name: "address",
        condition: always,
        render: address_line,
    },
    Clause {
        name: "timestamp",
        condition: always,
        render: timestamp_line,
    },
    Clause {
        name: "history",
        condition: has_history,
        render: history_section,
    },
    Clause {
        name: "knowledge",
        condition: has_knowledge,
        render: knowledge_section,
    },
];

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

fn has_history(ctx: &SynthesisContext<'_>) -> bool {
    ctx.has_history()
}

fn has_knowledge(ctx: &SynthesisContext<'_>) -> bool {
    ctx.has_knowledge()
}

fn goal_line(ctx: &SynthesisContext<'_>) -> String {
    format!("Current goal: {}", ctx.request.goal)
}

fn action_line(ctx: &SynthesisContext<'_>) -> String {
    format!(
        "Expected chain action: {}",
        or_placeholder(&ctx.request.chain_action, UNSPECIFIED)
    )
}

fn address_line(ctx: &SynthesisContext<'_>) -> String {
    format!(
        "Involved address: {}",
        or_placeholder(&ctx.request.address, UNSPECIFIED)
    )
}

fn timestamp_line(ctx: &SynthesisContext<'_>) -> String {
    format!("Timestamp: {}", format_utc(ctx.now))
}

fn history_section(ctx: &SynthesisContext<'_>) -> String {
    let max = ctx.config.summary_max_chars;
    let mut lines = vec![HISTORY_HEADER.to_string()];
    for (i, record) in ctx.history().iter().enumerate() {
        let summary = record
            .summary()
            .map_or_else(|| NO_SUMMARY.to_string(), |s| truncate_chars(s, max));
        lines.push(format!(
            "- [{}] {} goal: {} | result: {}",
            i + 1,
            record.created_at.render(),
            or_placeholder(&record.goal, UNTITLED),
            summary
        ));
    }
    lines.join("\n")
}

fn knowledge_section(ctx: &SynthesisContext<'_>) -> String {
    let max = ctx.config.content_max_chars;
    let mut lines = vec![KNOWLEDGE_HEADER.to_string()];
    for (i, entry) in ctx.knowledge().iter().enumerate() {
        let content = if entry.content.is_empty() {
            NO_DETAIL.to_string()
        } else {
            truncate_chars(&entry.content, max)
        };
        lines.push(format!(
            "- [{}] {}: {}",
            i + 1,
            or_placeholder(&entry.title, UNTITLED),
            content
        ));
    }
    lines.join("\n")
}
