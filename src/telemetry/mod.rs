//! Logging and metrics.
//!
//! This module provides:
//! - Structured logging via `tracing`
//! - In-process Prometheus counters for scan activity

mod metrics;
mod observability;

pub use metrics::{
    gather_metrics, init_metrics, DUPLICATES_SKIPPED, FILES_PROCESSED, HANDLER_FAILURES,
    SCAN_CYCLES, SCAN_DURATION, VOCABULARY_SIZE,
};
pub use observability::{init_tracing, spans};
