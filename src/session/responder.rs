//! Canned replies enriched with learned knowledge.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::knowledge::{KnowledgeStore, KnowledgeSummary};

const LEARNING_KEYWORDS: &[&str] = &["learn", "training", "data"];

const CAPABILITY_PHRASES: &[&str] = &["what can you do", "capabilities"];

const GREETINGS: &[&str] = &["hello", "hi", "hey"];

const GENERIC_REPLIES: &[&str] = &[
    "Working on that with my continuously updated knowledge",
    "Going by what I have learned so far, I follow your request",
    "Scanning new files keeps my answers improving. What else can I help with?",
];

/// Builds replies from the current knowledge summary.
#[derive(Debug, Clone)]
pub struct Responder {
    store: KnowledgeStore,
    scan_interval: Duration,
}

impl Responder {
    #[must_use]
    pub const fn new(store: KnowledgeStore, scan_interval: Duration) -> Self {
        Self {
            store,
            scan_interval,
        }
    }

    /// Current knowledge summary.
    #[must_use]
    pub fn summary(&self) -> KnowledgeSummary {
        self.store.summary()
    }

    /// Reply to free-form input.
    #[must_use]
    pub fn respond(&self, input: &str) -> String {
        self.respond_with(input, &mut rand::thread_rng())
    }

    /// Reply using the given random source for the generic fallback.
    #[must_use]
    pub fn respond_with<R: Rng + ?Sized>(&self, input: &str, rng: &mut R) -> String {
        let summary = self.store.summary();
        let lower = input.to_lowercase();
        let learned = learned_words(&summary);

        if LEARNING_KEYWORDS.iter().any(|k| lower.contains(k)) {
            return format!(
                "I keep learning from the watched directory{learned}. The knowledge base is current."
            );
        }

        if CAPABILITY_PHRASES.iter().any(|p| lower.contains(p)) {
            return format!(
                "My capabilities grow with every new file{learned}. I now know {} words.",
                summary.vocabulary_size
            );
        }

        let is_greeting = lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| GREETINGS.contains(&word));
        if is_greeting {
            return format!(
                "Hello! I scan for new files every {} seconds{learned}.",
                self.scan_interval.as_secs()
            );
        }

        let base = GENERIC_REPLIES.choose(rng).copied().unwrap_or(GENERIC_REPLIES[0]);
        format!("{base}{learned}")
    }
}

fn learned_words(summary: &KnowledgeSummary) -> String {
    if summary.vocabulary_sample.is_empty() {
        String::new()
    } else {
        format!(" [learned words: {}]", summary.vocabulary_sample.join(", "))
    }
}
