//! Shared knowledge store.

use std::sync::Arc;

use parking_lot::RwLock;

use super::base::{KnowledgeBase, KnowledgeDelta};
use super::summary::KnowledgeSummary;
use crate::telemetry::VOCABULARY_SIZE;
use crate::watcher::{Fingerprint, SeenSet};

#[derive(Debug, Default)]
struct StoreState {
    knowledge: KnowledgeBase,
    seen: SeenSet,
}

/// Knowledge and seen fingerprints behind a single lock.
///
/// The scanner is the only writer; the interactive session reads
/// consistent copies through [`KnowledgeStore::summary`] and
/// [`KnowledgeStore::knowledge`].
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    state: Arc<RwLock<StoreState>>,
}

impl KnowledgeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a fingerprint was already processed.
    #[must_use]
    pub fn is_seen(&self, fingerprint: &Fingerprint) -> bool {
        self.state.read().seen.contains(fingerprint)
    }

    /// Record a fingerprint and merge what was learned from it.
    ///
    /// `delta` is `None` when the handler failed; the fingerprint is still
    /// recorded so the file is not retried. Empty deltas leave the knowledge
    /// base untouched. Returns `false` (and drops the
    /// delta) if the fingerprint had already been recorded.
    pub fn commit(&self, fingerprint: Fingerprint, delta: Option<KnowledgeDelta>) -> bool {
        let mut state = self.state.write();
        if !state.seen.insert(fingerprint) {
            return false;
        }

        if let Some(delta) = delta.filter(|d| !d.is_empty()) {
            state.knowledge.apply(delta);
            #[allow(clippy::cast_possible_wrap)]
            VOCABULARY_SIZE.set(state.knowledge.vocabulary.len() as i64);
        }

        true
    }

    /// Number of distinct fingerprints processed.
    #[must_use]
    pub fn processed_files(&self) -> usize {
        self.state.read().seen.len()
    }

    /// Copy of the full knowledge base.
    #[must_use]
    pub fn knowledge(&self) -> KnowledgeBase {
        self.state.read().knowledge.clone()
    }

    /// Point-in-time summary.
    #[must_use]
    pub fn summary(&self) -> KnowledgeSummary {
        let state = self.state.read();
        KnowledgeSummary::from_knowledge(&state.knowledge, state.seen.len())
    }
}
