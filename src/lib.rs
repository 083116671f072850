//! autoscan library
//!
//! Periodically scans a directory tree, fingerprints files to find new ones
//! and accumulates vocabulary, topics, sentence fragments, structured
//! key/value pairs and code symbols in memory.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod knowledge;
pub mod session;
pub mod telemetry;
pub mod watcher;

pub use config::Config;
pub use error::{Error, Result};
