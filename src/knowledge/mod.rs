//! In-memory knowledge accumulated from scanned files.
//!
//! This module provides:
//! - The `KnowledgeBase` aggregate and the `KnowledgeDelta` handlers produce
//! - `KnowledgeStore`, the single lock guarding knowledge and seen fingerprints
//! - `KnowledgeSummary`, a point-in-time view for status output

mod base;
mod store;
mod summary;

pub use base::{CodePatterns, KnowledgeBase, KnowledgeDelta, Topic};
pub use store::KnowledgeStore;
pub use summary::KnowledgeSummary;
