//! File logging. The terminal belongs to the UI, so events go to `aria.log`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_log_dir};

pub const LOG_FILE: &str = "aria.log";

fn log_dir(settings: &LoggingSettings) -> PathBuf {
    settings
        .dir
        .clone()
        .or_else(default_log_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `RUST_LOG` wins over the configured level; a bad level falls back to `info`.
fn filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Keep the guard alive until exit so buffered
/// lines are flushed.
pub fn init(settings: &LoggingSettings) -> Result<WorkerGuard> {
    let dir = log_dir(settings);
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter(settings))
        .try_init()
        .map_err(|e| anyhow!(e))?;

    tracing::info!(dir = %dir.display(), "logging started");
    Ok(guard)
}
