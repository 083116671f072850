//! Point-in-time summary of the knowledge base.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::base::{KnowledgeBase, Topic};

/// Number of sample words carried in a summary.
const VOCABULARY_SAMPLE: usize = 3;

/// Snapshot used for status output and replies.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeSummary {
    pub vocabulary_size: usize,
    pub vocabulary_sample: Vec<String>,
    pub topics: Vec<Topic>,
    pub conversation_patterns: usize,
    pub structured_entries: usize,
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub processed_files: usize,
    pub generated_at: DateTime<Utc>,
}

impl KnowledgeSummary {
    /// Summarize `knowledge` given the number of processed files.
    #[must_use]
    pub fn from_knowledge(knowledge: &KnowledgeBase, processed_files: usize) -> Self {
        let (functions, classes) = knowledge
            .code_patterns
            .as_ref()
            .map(|c| (c.functions.clone(), c.classes.clone()))
            .unwrap_or_default();

        Self {
            vocabulary_size: knowledge.vocabulary.len(),
            vocabulary_sample: knowledge.vocabulary_sample(VOCABULARY_SAMPLE),
            topics: knowledge.topics.iter().copied().collect(),
            conversation_patterns: knowledge.conversation_patterns.len(),
            structured_entries: knowledge.structured_data.len(),
            functions,
            classes,
            processed_files,
            generated_at: Utc::now(),
        }
    }

    /// Serialize as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for KnowledgeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Knowledge snapshot:")?;

        write!(f, "  vocabulary: {} words", self.vocabulary_size)?;
        if !self.vocabulary_sample.is_empty() {
            write!(f, " (sample: {})", self.vocabulary_sample.join(", "))?;
        }
        writeln!(f)?;

        if self.topics.is_empty() {
            writeln!(f, "  topics: none")?;
        } else {
            let topics: Vec<&str> = self.topics.iter().map(|t| t.as_str()).collect();
            writeln!(f, "  topics: {}", topics.join(", "))?;
        }

        writeln!(f, "  conversation patterns: {}", self.conversation_patterns)?;
        writeln!(f, "  structured entries: {}", self.structured_entries)?;
        writeln!(
            f,
            "  code symbols: {} functions, {} classes",
            self.functions.len(),
            self.classes.len()
        )?;
        write!(f, "  processed files: {}", self.processed_files)
    }
}
