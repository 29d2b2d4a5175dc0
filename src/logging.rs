//! Logging configuration using the tracing ecosystem.
//!
//! Two setups are offered:
//! - [`init`]: daily-rotated log file under the local data directory, for
//!   hosts whose terminal output must stay clean
//! - [`init_stderr`]: compact output on stderr, for interactive debugging
//!
//! Both honour `RUST_LOG` and fall back to [`DEFAULT_LOG_FILTER`].

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
pub const DEFAULT_LOG_FILTER: &str = "jirainsight=info,warn";

const LOG_FILE_PREFIX: &str = "jirainsight.log";

/// Initialize file logging.
///
/// Logs are stored in the platform-specific local data directory:
/// - Linux: `~/.local/share/jirainsight/logs/`
/// - macOS: `~/Library/Application Support/jirainsight/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\jirainsight\logs\`
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created, or
/// if a global subscriber is already set.
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(env_filter(None));

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "JiraInsight starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

/// Initialize logging to stderr.
///
/// `level` overrides the default filter when `RUST_LOG` is unset, e.g.
/// `Some("jirainsight=debug")`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init_stderr(level: Option<&str>) -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(env_filter(level));

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn env_filter(fallback: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback.unwrap_or(DEFAULT_LOG_FILTER)))
}

/// Get the log directory path.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("jirainsight").join("logs"))
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("JiraInsight shutting down");
}
