//! The single-paragraph user-facing answer.

use super::clause::{Clause, SynthesisContext, always};

pub const ACTION_FALLBACK: &str = "specify the chain action";
pub const ADDRESS_FALLBACK: &str = "to be determined";
pub const HISTORY_FALLBACK: &str = "Recent task experience";
pub const KNOWLEDGE_FALLBACK: &str = "the relevant knowledge-base entries";

pub(crate) const REPLY_CLAUSES: &[Clause] = &[
    Clause {
        name: "acknowledge",
        condition: always,
        render: acknowledge,
    },
    Clause {
        name: "next_step",
        condition: always,
        render: next_step,
    },
    Clause {
        name: "history",
        condition: has_history,
        render: history_reference,
    },
    Clause {
        name: "knowledge",
        condition: has_knowledge,
        render: knowledge_reference,
    },
];

fn has_history(ctx: &SynthesisContext<'_>) -> bool {
    ctx.has_history()
}

fn has_knowledge(ctx: &SynthesisContext<'_>) -> bool {
    ctx.has_knowledge()
}

fn acknowledge(ctx: &SynthesisContext<'_>) -> String {
    format!("I understand your goal \"{}\".", ctx.request.goal)
}

fn next_step(ctx: &SynthesisContext<'_>) -> String {
    let action = &ctx.request.chain_action;
    let step = if action.is_empty() {
        ACTION_FALLBACK.to_string()
    } else {
        format!("carry out \"{action}\" on chain")
    };
    let address = if ctx.request.address.is_empty() {
        ADDRESS_FALLBACK
    } else {
        ctx.request.address.as_str()
    };
    format!("Next, {step} and keep address {address} secure.")
}

fn history_reference(ctx: &SynthesisContext<'_>) -> String {
    match ctx.history().first().map(|r| r.goal.trim()) {
        Some(goal) if !goal.is_empty() => {
            format!("The earlier task \"{goal}\" can serve as a reference.")
        }
        _ => format!("{HISTORY_FALLBACK} can serve as a reference."),
    }
}

fn knowledge_reference(ctx: &SynthesisContext<'_>) -> String {
    match ctx.knowledge().first().map(|k| k.title.trim()) {
        Some(title) if !title.is_empty() => {
            format!("See also the knowledge-base entry \"{title}\".")
        }
        _ => format!("See also {KNOWLEDGE_FALLBACK}."),
    }
}
