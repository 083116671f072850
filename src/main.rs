//! autoscan - background directory learner
//!
//! Entry point: scans the watched directory, keeps scanning in the
//! background and serves an interactive session on stdin/stdout.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use tokio::io::BufReader;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use autoscan::knowledge::KnowledgeStore;
use autoscan::session::{run_session, Responder};
use autoscan::telemetry::{init_metrics, init_tracing};
use autoscan::watcher::{Scanner, Scheduler};
use autoscan::{Config, Result};

/// autoscan - learns vocabulary, topics and symbols from new files
#[derive(Parser, Debug)]
#[command(name = "autoscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to scan recursively
    #[arg(short, long, env = "AUTOSCAN_WATCH_DIR", default_value = autoscan::config::DEFAULT_WATCH_DIR)]
    watch_dir: std::path::PathBuf,

    /// Seconds between scan cycles
    #[arg(short, long, env = "AUTOSCAN_SCAN_INTERVAL", default_value_t = autoscan::config::DEFAULT_SCAN_INTERVAL_SECS)]
    interval: u64,

    /// Milliseconds a single file handler may run
    #[arg(long, env = "AUTOSCAN_HANDLER_TIMEOUT_MS", default_value = "5000")]
    handler_timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "AUTOSCAN_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, env = "AUTOSCAN_LOG_JSON")]
    log_json: bool,

    /// Scan once, print the summary and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.log_json);

    tracing::info!("autoscan v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config {
        watch_dir: cli.watch_dir,
        scan_interval_secs: cli.interval,
        handler_timeout_ms: cli.handler_timeout_ms,
        log_level: cli.log_level,
    };

    tracing::debug!(?config, "Configuration loaded");

    config.validate()?;

    init_metrics();

    let store = KnowledgeStore::new();
    let scanner = Scanner::new(config.watch_dir.clone(), store.clone())
        .with_handler_timeout(config.handler_timeout());

    if cli.once {
        let report = scanner.scan().await?;
        tracing::info!(new_files = report.new_files, "Single scan finished");
        println!("{}", store.summary());
        return Ok(());
    }

    tracing::info!(
        "Watching {:?} every {}s",
        config.watch_dir,
        config.scan_interval_secs
    );

    let scheduler = Scheduler::new(scanner, config.scan_interval());
    let shutdown = scheduler.shutdown_token();
    let handle = scheduler.start().await;

    tokio::spawn(cancel_on_signal(shutdown.clone()));

    let responder = Responder::new(store, config.scan_interval());
    let stdin = BufReader::new(tokio::io::stdin());
    let session = run_session(stdin, tokio::io::stdout(), &responder, &shutdown).await;
    if let Err(e) = &session {
        tracing::error!(error = %e, "Interactive session failed");
        shutdown.cancel();
    }

    let stopped = handle.shutdown().await;
    if let Err(e) = &stopped {
        tracing::error!(error = %e, "Scheduler did not stop cleanly");
    }

    tracing::info!("autoscan stopped");

    // A pending stdin read cannot be cancelled and would keep the runtime alive.
    std::process::exit(exit_code(&session, &stopped))
}

/// Process exit status for the session and scheduler outcomes.
const fn exit_code(session: &Result<()>, stopped: &Result<()>) -> i32 {
    if session.is_err() || stopped.is_err() {
        1
    } else {
        0
    }
}

/// Cancel `token` on SIGTERM or Ctrl+C.
async fn cancel_on_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, stopping");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, stopping");
        }
        () = token.cancelled() => return,
    }

    token.cancel();
}
