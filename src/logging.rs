//! Tracing setup.
//!
//! The terminal belongs to the UI, so logs go to a daily rolling file only.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogSettings, default_log_dir};

const DAYS_TO_KEEP: usize = 7;

/// Where the log file lives: the configured directory, else the XDG state dir.
pub fn log_dir(settings: &LogSettings) -> Option<PathBuf> {
    settings.directory.clone().or_else(default_log_dir)
}

/// Filter from `RUST_LOG`, falling back to the configured level.
fn env_filter(settings: &LogSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `encore.<date>.log`.
///
/// Returns `Ok(None)` when no log directory can be determined. The returned
/// guard must be kept alive for buffered lines to be flushed.
///
/// # Errors
/// Returns an error if the directory cannot be created or a subscriber is
/// already installed.
pub fn init(settings: &LogSettings) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let Some(dir) = log_dir(settings) else {
        return Ok(None);
    };
    std::fs::create_dir_all(&dir)?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix("encore")
        .filename_suffix("log")
        .build(&dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(
            fmt::layer()
                .compact()
                .with_target(true)
                .with_level(true)
                .with_thread_names(true)
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(Some(guard))
}
