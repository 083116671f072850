//! Configuration settings and validation.

use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default directory scanned for training material.
pub const DEFAULT_WATCH_DIR: &str = "training_data";

/// Default delay between scan cycles.
pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 60;

/// Default time budget for a single file handler.
const DEFAULT_HANDLER_TIMEOUT_MS: u64 = 5_000;

/// Longest accepted scan interval (one day).
const MAX_SCAN_INTERVAL_SECS: u64 = 86_400;

/// Longest accepted handler budget (ten minutes).
const MAX_HANDLER_TIMEOUT_MS: u64 = 600_000;

/// Main configuration for the scanner.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory to scan recursively.
    pub watch_dir: PathBuf,

    /// Seconds to sleep between scan cycles.
    pub scan_interval_secs: u64,

    /// Milliseconds a single handler may run before it is abandoned.
    pub handler_timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watch_dir: PathBuf::from(DEFAULT_WATCH_DIR),
            scan_interval_secs: DEFAULT_SCAN_INTERVAL_SECS,
            handler_timeout_ms: DEFAULT_HANDLER_TIMEOUT_MS,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration values.
    ///
    /// The watched directory is allowed to be missing; it may be created
    /// after startup and is picked up on the next cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.watch_dir.as_os_str().is_empty() {
            return Err(Error::config("watch_dir cannot be empty"));
        }

        if self.scan_interval_secs == 0 {
            return Err(Error::config("scan_interval_secs cannot be 0"));
        }

        if self.scan_interval_secs > MAX_SCAN_INTERVAL_SECS {
            return Err(Error::config(format!(
                "scan_interval_secs cannot exceed {MAX_SCAN_INTERVAL_SECS}"
            )));
        }

        if self.handler_timeout_ms == 0 {
            return Err(Error::config("handler_timeout_ms cannot be 0"));
        }

        if self.handler_timeout_ms > MAX_HANDLER_TIMEOUT_MS {
            return Err(Error::config(format!(
                "handler_timeout_ms cannot exceed {MAX_HANDLER_TIMEOUT_MS}"
            )));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(Error::config(format!(
                "invalid log level '{}', must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    /// Delay between scan cycles.
    #[must_use]
    pub const fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }

    /// Time budget for a single file handler.
    #[must_use]
    pub const fn handler_timeout(&self) -> Duration {
        Duration::from_millis(self.handler_timeout_ms)
    }
}
