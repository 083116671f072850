//! Structured logging and tracing configuration.
//!
//! Provides setup for observability using the `tracing` crate with:
//! - Structured logging with JSON output option
//! - Configurable log levels
//! - Spans for scan cycles and per-file ingestion

use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

/// Initialize tracing with the given level and output format.
///
/// `RUST_LOG` takes precedence over `level` when set. Logs go to stderr so
/// they do not interleave with the interactive session on stdout.
///
/// # Panics
///
/// Panics if tracing subscriber has already been initialized in this process.
pub fn init_tracing(level: &str, json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        let json_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true);

        Registry::default().with(env_filter).with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(true);

        Registry::default().with(env_filter).with(fmt_layer).init();
    }

    tracing::debug!("Tracing initialized: level={}, json={}", level, json);
}

/// Span helpers for the scan pipeline.
pub mod spans {
    use std::path::Path;

    use tracing::{debug_span, info_span, Span};

    /// Create a span covering one scan cycle of `root`.
    #[must_use]
    pub fn scan_span(root: &Path) -> Span {
        info_span!("scan", root = %root.display())
    }

    /// Create a span for a single file handed to `handler`.
    #[must_use]
    pub fn ingest_span(path: &Path, handler: &str) -> Span {
        debug_span!("ingest", path = %path.display(), handler = %handler)
    }
}
