//! Stdout and file logging for the editor.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info,tileforged=debug";

const LOG_FILE_NAME: &str = "tileforged.log";

/// Build the env filter, falling back to [`DEFAULT_LOG_FILTER`]
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn session_separator() -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let separator = "=".repeat(80);
    format!(
        "\n\n{}\n=== New Session Started at {} ===\n{}\n",
        separator, timestamp, separator
    )
}

/// Install stdout and file logging.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for the duration of the program. Returns `None` if the logs directory
/// cannot be created or a global subscriber is already installed.
pub fn setup_logging() -> Option<WorkerGuard> {
    setup_logging_in(&crate::paths::logs_dir())
}

fn setup_logging_in(logs_dir: &Path) -> Option<WorkerGuard> {
    if std::fs::create_dir_all(logs_dir).is_err() {
        eprintln!("Failed to create logs directory {:?}", logs_dir);
        return None;
    }

    let log_file_path = logs_dir.join(LOG_FILE_NAME);

    // Append session separator to existing log file
    if let Ok(mut file) = OpenOptions::new().append(true).open(&log_file_path) {
        let _ = writeln!(file, "{}", session_separator());
    }

    let file_appender = tracing_appender::rolling::never(logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // No ANSI colors in the file
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(log_filter())
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .ok()?;

    Some(guard)
}
