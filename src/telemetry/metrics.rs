//! Prometheus metrics definitions.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, register_int_gauge,
    Encoder, Histogram, IntCounter, IntCounterVec, IntGauge, TextEncoder,
};

/// Files whose fingerprint was committed for the first time.
pub static FILES_PROCESSED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "autoscan_files_processed_total",
        "Total number of newly fingerprinted files"
    )
    .unwrap()
});

/// Files skipped because their fingerprint was already seen.
pub static DUPLICATES_SKIPPED: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "autoscan_duplicates_skipped_total",
        "Total number of files skipped as already seen"
    )
    .unwrap()
});

/// Handler failures by handler kind.
pub static HANDLER_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "autoscan_handler_failures_total",
        "Total number of files a handler failed to ingest",
        &["handler"]
    )
    .unwrap()
});

/// Scan cycles by outcome (ok, missing_root, error).
pub static SCAN_CYCLES: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "autoscan_scan_cycles_total",
        "Total number of scan cycles",
        &["outcome"]
    )
    .unwrap()
});

/// Scan cycle duration.
pub static SCAN_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "autoscan_scan_duration_seconds",
        "Scan cycle duration in seconds",
        vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0]
    )
    .unwrap()
});

/// Current vocabulary size.
pub static VOCABULARY_SIZE: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!("autoscan_vocabulary_size", "Number of learned words").unwrap()
});

/// Initialize all metrics (call once at startup).
pub fn init_metrics() {
    // Access lazy statics to register them
    let _ = &*FILES_PROCESSED;
    let _ = &*DUPLICATES_SKIPPED;
    let _ = &*HANDLER_FAILURES;
    let _ = &*SCAN_CYCLES;
    let _ = &*SCAN_DURATION;
    let _ = &*VOCABULARY_SIZE;

    tracing::debug!("Prometheus metrics initialized");
}

/// Encode the default registry in Prometheus text format.
#[must_use]
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}
