// Logging setup. The interactive list owns the terminal, so tracing output
// goes to a file or nowhere.

use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_PREFIX: &str = "rearrange.log";

// RUST_LOG > config level
pub fn filter(config: &LoggingConfig) -> EnvFilter {
    let default_filter = format!("rearrange={}", config.level);
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    if !config.file_enabled {
        return Ok(None);
    }
    std::fs::create_dir_all(&config.file_dir).map_err(|e| Error::io(&config.file_dir, e))?;
    let appender = tracing_appender::rolling::daily(&config.file_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| Error::Program(format!("failed to install log subscriber: {e}")))?;
    Ok(Some(guard))
}
