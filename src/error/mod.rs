//! Error types and Result aliases for autoscan.
//!
//! This module defines the error hierarchy used throughout the crate.
//! All public functions return `Result<T, Error>` or `Result<T>`.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using autoscan's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for autoscan operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Directory scanning error.
    #[error("watcher error: {0}")]
    Watcher(#[from] WatcherError),

    /// File ingestion error.
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Directory scanning errors.
#[derive(Error, Debug)]
pub enum WatcherError {
    /// Watched root does not exist.
    #[error("watched root '{path}' not found")]
    RootNotFound { path: String },

    /// Directory traversal error.
    #[error("failed to walk '{path}': {reason}")]
    Walk { path: String, reason: String },

    /// Background scan task failed to complete.
    #[error("scan task failed: {0}")]
    ScanTask(String),
}

/// Per-file ingestion errors.
///
/// These never leave the scan loop; they are logged and the file is
/// still recorded as seen.
#[derive(Error, Debug)]
pub enum IngestError {
    /// File content could not be read.
    #[error("unreadable file: {0}")]
    Unreadable(String),

    /// Content is not valid UTF-8.
    #[error("decode error: {0}")]
    Decode(String),

    /// Structured content failed to parse.
    #[error("malformed content: {0}")]
    Malformed(String),

    /// Handler exceeded its time budget.
    #[error("handler timed out after {0:?}")]
    TimedOut(Duration),

    /// Handler panicked.
    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl WatcherError {
    /// Create a root-not-found error.
    pub fn root_not_found(path: &std::path::Path) -> Self {
        Self::RootNotFound {
            path: path.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests;
