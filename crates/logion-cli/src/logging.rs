use anyhow::{Context, Result};
use logion_infrastructure::LogionPaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "logion-demo.log";

/// Installs the global subscriber writing to a daily-rolling file in the
/// logs dir, keeping the terminal free for the REPL.
///
/// The returned guard flushes pending lines on drop and must be held until
/// exit.
pub fn init(paths: &LogionPaths, level: Option<&str>) -> Result<WorkerGuard> {
    let logs_dir = paths.logs_dir().context("Failed to resolve logs directory")?;
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create logs directory {}", logs_dir.display()))?;

    let filter = match level {
        Some(level) => {
            EnvFilter::try_new(level).with_context(|| format!("Invalid log level '{}'", level))?
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("logion-demo starting, logs in {}", logs_dir.display());
    Ok(guard)
}
