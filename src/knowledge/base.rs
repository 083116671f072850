//! Knowledge base model and merge rules.

#![allow(clippy::missing_const_for_fn)]

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

/// Topic label from the fixed keyword taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Technology,
    Business,
    Science,
    Creative,
}

impl Topic {
    /// Label as shown to users.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Technology => "technology",
            Self::Business => "business",
            Self::Science => "science",
            Self::Creative => "creative",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers extracted from the most recently ingested code file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodePatterns {
    /// Function names, in source order.
    pub functions: Vec<String>,
    /// Class (or type) names, in source order.
    pub classes: Vec<String>,
}

/// What a single handler learned from a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeDelta {
    /// Lowercase alphabetic tokens of length >= 3.
    pub vocabulary: BTreeSet<String>,
    /// Topics whose keywords occurred in the text.
    pub topics: BTreeSet<Topic>,
    /// Trimmed sentence fragments longer than 10 characters, in order.
    pub fragments: Vec<String>,
    /// Key/value pairs in document order.
    pub structured: Vec<(String, String)>,
    /// Replacement code patterns, if the file was source code.
    pub code: Option<CodePatterns>,
}

impl KnowledgeDelta {
    /// Check if the delta carries nothing to merge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
            && self.topics.is_empty()
            && self.fragments.is_empty()
            && self.structured.is_empty()
            && self.code.is_none()
    }
}

/// Aggregate of everything learned so far.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KnowledgeBase {
    pub vocabulary: BTreeSet<String>,
    pub topics: BTreeSet<Topic>,
    pub structured_data: BTreeMap<String, String>,
    pub conversation_patterns: Vec<String>,
    pub code_patterns: Option<CodePatterns>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a delta.
    ///
    /// Sets union, fragments append without dedup, structured keys are
    /// last-write-wins and code patterns are replaced wholesale.
    pub fn apply(&mut self, delta: KnowledgeDelta) {
        self.vocabulary.extend(delta.vocabulary);
        self.topics.extend(delta.topics);
        self.conversation_patterns.extend(delta.fragments);

        for (key, value) in delta.structured {
            self.structured_data.insert(key, value);
        }

        if let Some(code) = delta.code {
            self.code_patterns = Some(code);
        }
    }

    /// Up to `n` learned words, in sorted order.
    #[must_use]
    pub fn vocabulary_sample(&self, n: usize) -> Vec<String> {
        self.vocabulary.iter().take(n).cloned().collect()
    }
}
