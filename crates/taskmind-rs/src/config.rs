//! Display limits for the synthesizer.
//!
//! The defaults reproduce the daemon's stub: three history tasks, three
//! knowledge entries, 60-character summaries and 80-character content.
//!
//! ```
//! use taskmind_rs::SynthesizerConfig;
//!
//! let config = SynthesizerConfig::default()
//!     .with_history_limit(5)
//!     .with_summary_max_chars(120);
//! assert_eq!(config.history_limit, 5);
//! assert_eq!(config.knowledge_limit, 3);
//! ```

/// Default number of history records reflected in the thought.
pub const DEFAULT_HISTORY_LIMIT: usize = 3;
/// Default number of knowledge entries reflected in the thought.
pub const DEFAULT_KNOWLEDGE_LIMIT: usize = 3;
/// Default maximum characters of a history summary.
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 60;
/// Default maximum characters of a knowledge entry's content.
pub const DEFAULT_CONTENT_MAX_CHARS: usize = 80;

/// Limits applied when rendering history and knowledge into the thought.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizerConfig {
    /// Maximum history records listed. Default: `3`.
    pub history_limit: usize,
    /// Maximum knowledge entries listed. Default: `3`.
    pub knowledge_limit: usize,
    /// Characters kept from a history summary before `...`. Default: `60`.
    pub summary_max_chars: usize,
    /// Characters kept from knowledge content before `...`. Default: `80`.
    pub content_max_chars: usize,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            knowledge_limit: DEFAULT_KNOWLEDGE_LIMIT,
            summary_max_chars: DEFAULT_SUMMARY_MAX_CHARS,
            content_max_chars: DEFAULT_CONTENT_MAX_CHARS,
        }
    }
}

impl SynthesizerConfig {
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_knowledge_limit(mut self, limit: usize) -> Self {
        self.knowledge_limit = limit;
        self
    }

    pub fn with_summary_max_chars(mut self, max: usize) -> Self {
        self.summary_max_chars = max;
        self
    }

    pub fn with_content_max_chars(mut self, max: usize) -> Self {
        self.content_max_chars = max;
        self
    }
}
