//! Content fingerprints and change detection.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::IngestError;

use super::filter::{FileFilter, HandlerKind};

/// 256-bit blake3 digest of file content (or of the path, as a fallback).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint raw bytes.
    #[must_use]
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(*blake3::hash(bytes).as_bytes())
    }

    /// Fingerprint a path string, used when the file cannot be read.
    #[must_use]
    pub fn of_path(path: &Path) -> Self {
        Self::of_bytes(path.to_string_lossy().as_bytes())
    }

    /// Full hex encoding.
    #[must_use]
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex()[..16])
    }
}

/// Fingerprints already processed. Grows for the life of the process.
#[derive(Debug, Default)]
pub struct SeenSet {
    inner: HashSet<Fingerprint>,
}

impl SeenSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fingerprint. Returns `false` if it was already present.
    pub fn insert(&mut self, fingerprint: Fingerprint) -> bool {
        self.inner.insert(fingerprint)
    }

    #[must_use]
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.inner.contains(fingerprint)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// A file found during a scan pass.
#[derive(Debug)]
pub struct WatchedFile {
    /// Filesystem path.
    pub path: PathBuf,
    /// Content fingerprint.
    pub fingerprint: Fingerprint,
    /// Handler chosen from the extension.
    pub kind: HandlerKind,
    content: Result<Vec<u8>, IngestError>,
}

impl WatchedFile {
    /// Read and fingerprint a file.
    ///
    /// Never fails: if the read fails the path itself is fingerprinted and
    /// the read error is kept for the handler stage.
    pub async fn load(path: PathBuf) -> Self {
        match tokio::fs::read(&path).await {
            Ok(bytes) => Self::from_bytes(path, bytes),
            Err(e) => Self {
                fingerprint: Fingerprint::of_path(&path),
                kind: FileFilter::handler_for(&path),
                content: Err(IngestError::Unreadable(e.to_string())),
                path,
            },
        }
    }

    /// Build from bytes already in memory.
    #[must_use]
    pub fn from_bytes(path: PathBuf, bytes: Vec<u8>) -> Self {
        Self {
            fingerprint: Fingerprint::of_bytes(&bytes),
            kind: FileFilter::handler_for(&path),
            content: Ok(bytes),
            path,
        }
    }

    /// Whether the content was read successfully.
    #[must_use]
    pub const fn is_readable(&self) -> bool {
        self.content.is_ok()
    }

    /// Take the content, or the read error.
    ///
    /// # Errors
    ///
    /// Returns the error recorded when the file could not be read.
    pub fn into_content(self) -> Result<Vec<u8>, IngestError> {
        self.content
    }
}
