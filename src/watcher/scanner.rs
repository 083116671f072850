//! Directory scanner.
//!
//! Walks the watched root, fingerprints every regular file and hands files
//! with an unseen fingerprint to their handler.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use walkdir::WalkDir;

use super::fingerprint::WatchedFile;
use super::handler::dispatch;
use crate::error::WatcherError;
use crate::knowledge::KnowledgeStore;
use crate::telemetry::{
    spans, DUPLICATES_SKIPPED, FILES_PROCESSED, HANDLER_FAILURES, SCAN_CYCLES, SCAN_DURATION,
};
use crate::Result;

/// Default time budget for one handler invocation.
const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of one scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Regular files visited.
    pub files_found: u64,
    /// Files with a fingerprint not seen before.
    pub new_files: u64,
    /// Files skipped because their fingerprint was already seen.
    pub duplicates: u64,
    /// New files whose handler failed (still recorded as seen).
    pub failures: u64,
    /// Directory entries that could not be read.
    pub walk_errors: u64,
    /// The watched root did not exist.
    pub root_missing: bool,
    /// The pass stopped early on cancellation.
    pub cancelled: bool,
}

/// Scans one root into a shared knowledge store.
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    store: KnowledgeStore,
    handler_timeout: Duration,
}

impl Scanner {
    /// Create a scanner for `root` writing into `store`.
    pub fn new(root: impl Into<PathBuf>, store: KnowledgeStore) -> Self {
        Self {
            root: root.into(),
            store,
            handler_timeout: DEFAULT_HANDLER_TIMEOUT,
        }
    }

    /// Set the per-file handler time budget.
    #[must_use]
    pub const fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = timeout;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// Run one full scan pass.
    ///
    /// A missing root is not an error: the report has `root_missing` set
    /// and zero new files.
    ///
    /// # Errors
    ///
    /// Returns an error only if the directory walk task itself fails.
    pub async fn scan(&self) -> Result<ScanReport> {
        self.scan_until(&CancellationToken::new()).await
    }

    /// Run one scan pass, stopping between files once `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns an error only if the directory walk task itself fails.
    pub async fn scan_until(&self, cancel: &CancellationToken) -> Result<ScanReport> {
        let started = Instant::now();
        let result = self
            .scan_inner(cancel)
            .instrument(spans::scan_span(&self.root))
            .await;
        SCAN_DURATION.observe(started.elapsed().as_secs_f64());

        let outcome = match &result {
            Ok(report) if report.root_missing => "missing_root",
            Ok(_) => "ok",
            Err(_) => "error",
        };
        SCAN_CYCLES.with_label_values(&[outcome]).inc();

        if let Ok(report) = &result {
            #[allow(clippy::cast_possible_truncation)]
            let elapsed_ms = started.elapsed().as_millis() as u64;
            tracing::debug!(
                root = %self.root.display(),
                found = report.files_found,
                new_files = report.new_files,
                duplicates = report.duplicates,
                failures = report.failures,
                walk_errors = report.walk_errors,
                elapsed_ms,
                "Scan complete"
            );
        }

        result
    }

    async fn scan_inner(&self, cancel: &CancellationToken) -> Result<ScanReport> {
        let mut report = ScanReport::default();

        if !self.root.is_dir() {
            let err = WatcherError::root_not_found(&self.root);
            tracing::warn!(error = %err, "Skipping scan");
            report.root_missing = true;
            return Ok(report);
        }

        let root = self.root.clone();
        let (paths, walk_errors) = tokio::task::spawn_blocking(move || list_files(&root))
            .await
            .map_err(|e| WatcherError::ScanTask(e.to_string()))?;
        report.walk_errors = walk_errors;

        for path in paths {
            if cancel.is_cancelled() {
                tracing::debug!("Scan cancelled");
                report.cancelled = true;
                break;
            }

            report.files_found += 1;
            let file = WatchedFile::load(path).await;
            let fingerprint = file.fingerprint;

            if self.store.is_seen(&fingerprint) {
                report.duplicates += 1;
                DUPLICATES_SKIPPED.inc();
                continue;
            }

            let path = file.path.clone();
            let kind = file.kind;
            if !file.is_readable() {
                tracing::debug!(path = %path.display(), %fingerprint, "Unreadable file, fingerprinted by path");
            }
            let delta = match dispatch(file, self.handler_timeout)
                .instrument(spans::ingest_span(&path, kind.label()))
                .await
            {
                Ok(delta) => Some(delta),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        handler = kind.label(),
                        error = %e,
                        "Failed to ingest file"
                    );
                    HANDLER_FAILURES.with_label_values(&[kind.label()]).inc();
                    report.failures += 1;
                    None
                }
            };

            if self.store.commit(fingerprint, delta) {
                report.new_files += 1;
                FILES_PROCESSED.inc();
                tracing::debug!(path = %path.display(), %fingerprint, handler = %kind, "Learned file");
            } else {
                report.duplicates += 1;
                DUPLICATES_SKIPPED.inc();
            }
        }

        Ok(report)
    }
}

/// Enumerate files under `root` in file-name order.
fn list_files(root: &Path) -> (Vec<PathBuf>, u64) {
    let mut files = Vec::new();
    let mut errors = 0;

    for entry in WalkDir::new(root).sort_by_file_name() {
        match entry {
            Ok(entry) if is_regular_file(&entry) => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => {
                let err = WatcherError::Walk {
                    path: e
                        .path()
                        .unwrap_or(root)
                        .display()
                        .to_string(),
                    reason: e.to_string(),
                };
                tracing::warn!(error = %err, "Skipping unreadable entry");
                errors += 1;
            }
        }
    }

    (files, errors)
}

/// Regular files, plus symlinks that resolve to one. Linked directories are
/// not descended into.
fn is_regular_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scanner_for(path: &Path) -> Scanner {
        Scanner::new(path, KnowledgeStore::new())
    }

    #[test]
    fn test_list_files_recursive_and_sorted() {
        let tmp = TempDir::new().unwrap();
        let docs = tmp.path().join("docs");
        fs::create_dir(&docs).unwrap();
        fs::write(tmp.path().join("b.txt"), "b").unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::write(docs.join("c.md"), "c").unwrap();

        let (files, errors) = list_files(tmp.path());

        assert_eq!(errors, 0);
        assert_eq!(files.len(), 3);
        assert!(files[0].ends_with("a.txt"));
        assert!(files[1].ends_with("b.txt"));
        assert!(files[2].ends_with("docs/c.md"));
    }

    #[tokio::test]
    async fn test_scan_counts_new_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.txt"), "Research notes about the market.").unwrap();
        fs::write(tmp.path().join("data.json"), r#"{"title": "quarterly report"}"#).unwrap();

        let scanner = scanner_for(tmp.path());
        let report = scanner.scan().await.unwrap();

        assert_eq!(report.files_found, 2);
        assert_eq!(report.new_files, 2);
        assert_eq!(report.duplicates, 0);
        assert_eq!(scanner.store().processed_files(), 2);
    }

    #[tokio::test]
    async fn test_rescan_finds_nothing_new() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.txt"), "Nothing changes between scans.").unwrap();

        let scanner = scanner_for(tmp.path());
        assert_eq!(scanner.scan().await.unwrap().new_files, 1);

        let second = scanner.scan().await.unwrap();
        assert_eq!(second.new_files, 0);
        assert_eq!(second.duplicates, 1);
    }

    #[tokio::test]
    async fn test_missing_root() {
        let tmp = TempDir::new().unwrap();
        let scanner = scanner_for(&tmp.path().join("training_data"));

        let report = scanner.scan().await.unwrap();

        assert!(report.root_missing);
        assert_eq!(report.new_files, 0);
    }

    #[tokio::test]
    async fn test_malformed_file_is_still_marked_seen() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.json"), "{ not json").unwrap();

        let scanner = scanner_for(tmp.path());
        let first = scanner.scan().await.unwrap();
        assert_eq!(first.new_files, 1);
        assert_eq!(first.failures, 1);

        let second = scanner.scan().await.unwrap();
        assert_eq!(second.new_files, 0);
        assert_eq!(second.failures, 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_file_is_learned() {
        let tmp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let real = outside.path().join("real.txt");
        fs::write(&real, "Symlinked research notes here.").unwrap();
        std::os::unix::fs::symlink(&real, tmp.path().join("link.txt")).unwrap();

        let linked_dir = outside.path().join("more");
        fs::create_dir(&linked_dir).unwrap();
        fs::write(linked_dir.join("hidden.txt"), "Inside a linked directory.").unwrap();
        std::os::unix::fs::symlink(&linked_dir, tmp.path().join("more")).unwrap();

        let scanner = scanner_for(tmp.path());
        let report = scanner.scan().await.unwrap();

        assert_eq!(report.files_found, 1);
        assert_eq!(report.new_files, 1);
        assert!(scanner.store().knowledge().vocabulary.contains("symlinked"));
        assert!(!scanner.store().knowledge().vocabulary.contains("inside"));
    }

    #[tokio::test]
    async fn test_timed_out_handler_marks_file_seen() {
        let tmp = TempDir::new().unwrap();
        let body = "Research notes about the market and the story. ".repeat(128 * 1024);
        fs::write(tmp.path().join("large.txt"), body).unwrap();

        let scanner = scanner_for(tmp.path()).with_handler_timeout(Duration::from_nanos(1));
        let first = scanner.scan().await.unwrap();

        assert_eq!(first.new_files, 1);
        assert_eq!(first.failures, 1);
        assert!(scanner.store().knowledge().vocabulary.is_empty());
        assert!(scanner.store().knowledge().topics.is_empty());

        let second = scanner.scan().await.unwrap();
        assert_eq!(second.new_files, 0);
        assert_eq!(second.duplicates, 1);
    }

    #[tokio::test]
    async fn test_cancelled_scan_stops_early() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "first file content").unwrap();
        fs::write(tmp.path().join("b.txt"), "second file content").unwrap();

        let token = CancellationToken::new();
        token.cancel();

        let scanner = scanner_for(tmp.path());
        let report = scanner.scan_until(&token).await.unwrap();

        assert!(report.cancelled);
        assert_eq!(report.new_files, 0);
        assert_eq!(scanner.store().processed_files(), 0);
    }
}
