//! Directory scanning and ingestion.
//!
//! This module provides:
//! - Content fingerprinting and the seen-file set
//! - Extension-based routing to text, structured and code handlers
//! - A scan loop over the watched root
//! - A cancellable scheduler that repeats the scan on an interval

mod analysis;
mod filter;
mod fingerprint;
mod handler;
mod scanner;
mod scheduler;

pub use analysis::{code_symbols, detect_topics, sentence_fragments, vocabulary, TOPIC_TAXONOMY};
pub use filter::{FileFilter, HandlerKind, Language};
pub use fingerprint::{Fingerprint, SeenSet, WatchedFile};
pub use handler::dispatch;
pub use scanner::{ScanReport, Scanner};
pub use scheduler::{Scheduler, SchedulerHandle, SchedulerState};
