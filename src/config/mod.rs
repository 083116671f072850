//! Configuration management for autoscan.
//!
//! Supports configuration from:
//! - Command-line arguments (highest priority)
//! - Environment variables
//! - Built-in defaults (lowest priority)

mod settings;

pub use settings::{Config, DEFAULT_SCAN_INTERVAL_SECS, DEFAULT_WATCH_DIR};
