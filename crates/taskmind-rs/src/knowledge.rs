//! Static, file-backed knowledge snippets.
//!
//! The daemon keeps a small JSON file of reference snippets and attaches the
//! ones relevant to a task before asking for a reply. Matching is plain
//! case-insensitive substring search of each snippet's keywords (then tags)
//! against the goal and chain action; a snippet without keywords matches
//! everything.
//!
//! ```json
//! [
//!   {"title": "Gas", "content": "Gas prices fluctuate.", "keywords": ["gas"], "tags": ["fees"]},
//!   {"title": "Always shown", "content": "General advice."}
//! ]
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::BridgeError;
use crate::request::KnowledgeEntry;

/// Results returned when the configured maximum is zero.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// One entry of the knowledge file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<&Snippet> for KnowledgeEntry {
    fn from(snippet: &Snippet) -> Self {
        KnowledgeEntry::new(snippet.title.as_str(), snippet.content.as_str())
    }
}

/// An in-memory snippet list with keyword lookup.
#[derive(Debug, Clone, Default)]
pub struct StaticKnowledge {
    items: Vec<Snippet>,
    max_results: usize,
}

impl StaticKnowledge {
    pub fn new(items: Vec<Snippet>, max_results: usize) -> Self {
        let max_results = if max_results == 0 {
            DEFAULT_MAX_RESULTS
        } else {
            max_results
        };
        Self { items, max_results }
    }

    /// Load snippets from a JSON array file.
    pub fn load(path: &Path, max_results: usize) -> Result<Self, BridgeError> {
        if path.as_os_str().is_empty() {
            return Err(BridgeError::Knowledge("knowledge file path is empty".into()));
        }
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::Knowledge(format!("failed to read {}: {e}", path.display()))
        })?;
        let items: Vec<Snippet> = serde_json::from_str(&raw).map_err(|e| {
            BridgeError::Knowledge(format!("failed to parse {}: {e}", path.display()))
        })?;
        info!("[knowledge] loaded {} snippets from {}", items.len(), path.display());
        Ok(Self::new(items, max_results))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snippets relevant to a goal and chain action, in file order, capped
    /// at the configured maximum.
    pub fn query(&self, goal: &str, chain_action: &str) -> Vec<&Snippet> {
        let goal = goal.trim().to_lowercase();
        let action = chain_action.trim().to_lowercase();
        let hits: Vec<&Snippet> = self
            .items
            .iter()
            .filter(|s| is_relevant(s, &goal, &action))
            .take(self.max_results)
            .collect();
        debug!("[knowledge] {} of {} snippets matched", hits.len(), self.items.len());
        hits
    }
}

fn is_relevant(snippet: &Snippet, goal: &str, action: &str) -> bool {
    if snippet.keywords.is_empty() {
        return true;
    }
    let hit = |term: &String| {
        let term = term.trim().to_lowercase();
        !term.is_empty() && (goal.contains(&term) || action.contains(&term))
    };
    snippet.keywords.iter().any(hit) || snippet.tags.iter().any(hit)
}
