//! Periodic background scanning.
//!
//! `Scheduler::start` runs one scan immediately, then spawns a task that
//! sleeps for the interval and scans again until its token is cancelled.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::scanner::{ScanReport, Scanner};
use crate::error::WatcherError;
use crate::Result;

/// Scheduler lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Not scanning: before start, or after stop.
    Idle,
    /// Background scanning is active.
    Running,
}

/// Drives a [`Scanner`] on a fixed interval.
pub struct Scheduler {
    scanner: Scanner,
    interval: Duration,
    shutdown_token: CancellationToken,
}

impl Scheduler {
    /// Create an idle scheduler.
    #[must_use]
    pub fn new(scanner: Scanner, interval: Duration) -> Self {
        Self {
            scanner,
            interval,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Token that stops the scheduler when cancelled.
    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Idle -> Running: scan once now, then keep scanning in the background.
    pub async fn start(self) -> SchedulerHandle {
        let initial = match self.scanner.scan_until(&self.shutdown_token).await {
            Ok(report) => {
                report_cycle(&self.scanner, &report);
                Some(report)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Initial scan failed");
                None
            }
        };

        let cycles = Arc::new(AtomicU64::new(0));
        let task = tokio::spawn(run(
            self.scanner,
            self.interval,
            self.shutdown_token.clone(),
            Arc::clone(&cycles),
        ));

        SchedulerHandle {
            shutdown_token: self.shutdown_token,
            task,
            cycles,
            initial,
        }
    }
}

/// Handle to a running scheduler.
pub struct SchedulerHandle {
    shutdown_token: CancellationToken,
    task: JoinHandle<()>,
    cycles: Arc<AtomicU64>,
    initial: Option<ScanReport>,
}

impl SchedulerHandle {
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        if self.shutdown_token.is_cancelled() || self.task.is_finished() {
            SchedulerState::Idle
        } else {
            SchedulerState::Running
        }
    }

    /// Report from the scan performed at start, if it completed.
    #[must_use]
    pub const fn initial_report(&self) -> Option<ScanReport> {
        self.initial
    }

    /// Background cycles finished so far (the initial scan is not counted).
    #[must_use]
    pub fn cycles_completed(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Request a stop without waiting for the task.
    pub fn stop(&self) {
        self.shutdown_token.cancel();
    }

    /// Stop and wait for the background task to exit.
    ///
    /// A pending sleep is interrupted; a scan in progress stops at the next
    /// file boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if the background task panicked.
    pub async fn shutdown(self) -> Result<()> {
        self.shutdown_token.cancel();
        self.task
            .await
            .map_err(|e| WatcherError::ScanTask(e.to_string()))?;
        Ok(())
    }
}

async fn run(
    scanner: Scanner,
    interval: Duration,
    shutdown_token: CancellationToken,
    cycles: Arc<AtomicU64>,
) {
    tracing::info!(
        root = %scanner.root().display(),
        interval_secs = interval.as_secs_f64(),
        "Background scanning started"
    );

    loop {
        tokio::select! {
            () = shutdown_token.cancelled() => break,
            () = tokio::time::sleep(interval) => {}
        }

        if shutdown_token.is_cancelled() {
            break;
        }

        // Each cycle gets its own task so a panic surfaces as a JoinError.
        let cycle_scanner = scanner.clone();
        let cycle_token = shutdown_token.clone();
        let outcome =
            tokio::spawn(async move { cycle_scanner.scan_until(&cycle_token).await }).await;

        match outcome {
            Ok(Ok(report)) => report_cycle(&scanner, &report),
            Ok(Err(e)) => tracing::warn!(error = %e, "Scan cycle failed"),
            Err(e) => tracing::error!(error = %e, "Scan cycle panicked"),
        }

        cycles.fetch_add(1, Ordering::Relaxed);
    }

    tracing::info!("Background scanning stopped");
}

fn report_cycle(scanner: &Scanner, report: &ScanReport) {
    if report.new_files == 0 {
        return;
    }

    let summary = scanner.store().summary();
    let topics: Vec<&str> = summary.topics.iter().map(|t| t.as_str()).collect();
    tracing::info!(
        new_files = report.new_files,
        vocabulary = summary.vocabulary_size,
        sample = %summary.vocabulary_sample.join(", "),
        topics = %topics.join(", "),
        patterns = summary.conversation_patterns,
        processed = summary.processed_files,
        "Learned from new files"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeStore;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    async fn wait_for(store: &KnowledgeStore, processed: usize) -> bool {
        for _ in 0..200 {
            if store.processed_files() >= processed {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }

    fn scheduler_for(root: &Path, interval: Duration) -> (Scheduler, KnowledgeStore) {
        let store = KnowledgeStore::new();
        let scanner = Scanner::new(root, store.clone());
        (Scheduler::new(scanner, interval), store)
    }

    #[tokio::test]
    async fn test_start_scans_immediately() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "An immediate scan happens.").unwrap();
        fs::write(tmp.path().join("b.py"), "def go():\n    pass\n").unwrap();

        let (scheduler, store) = scheduler_for(tmp.path(), Duration::from_secs(3600));
        let handle = scheduler.start().await;

        assert_eq!(handle.initial_report().unwrap().new_files, 2);
        assert_eq!(store.processed_files(), 2);
        assert_eq!(handle.state(), SchedulerState::Running);
        assert_eq!(handle.cycles_completed(), 0);

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_background_cycle_picks_up_new_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("first.txt"), "The first file is here.").unwrap();

        let (scheduler, store) = scheduler_for(tmp.path(), Duration::from_millis(50));
        let handle = scheduler.start().await;
        assert_eq!(store.processed_files(), 1);

        fs::write(tmp.path().join("second.txt"), "A second file shows up later.").unwrap();

        assert!(wait_for(&store, 2).await, "second file was never scanned");
        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_root_is_retried() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("training_data");

        let (scheduler, store) = scheduler_for(&root, Duration::from_millis(50));
        let handle = scheduler.start().await;
        assert!(handle.initial_report().unwrap().root_missing);
        assert_eq!(handle.state(), SchedulerState::Running);

        fs::create_dir(&root).unwrap();
        fs::write(root.join("late.md"), "# Created after startup").unwrap();

        assert!(wait_for(&store, 1).await, "late directory was never scanned");
        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_stop_does_not_wait_for_interval() {
        let tmp = TempDir::new().unwrap();
        let (scheduler, _store) = scheduler_for(tmp.path(), Duration::from_secs(3600));
        let handle = scheduler.start().await;

        handle.stop();
        assert_eq!(handle.state(), SchedulerState::Idle);

        let shutdown = tokio::time::timeout(Duration::from_secs(2), handle.shutdown()).await;
        assert!(shutdown.is_ok(), "shutdown waited out the interval");
    }

    #[tokio::test]
    async fn test_external_token_stops_scheduler() {
        let tmp = TempDir::new().unwrap();
        let (scheduler, _store) = scheduler_for(tmp.path(), Duration::from_millis(20));
        let token = scheduler.shutdown_token();
        let handle = scheduler.start().await;

        token.cancel();
        assert_eq!(handle.state(), SchedulerState::Idle);
        handle.shutdown().await.unwrap();
    }
}
