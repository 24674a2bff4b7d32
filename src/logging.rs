use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter
pub const LOG_ENV: &str = "FOKUS_LOG";

/// Guard that must be kept alive to ensure logs are flushed
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Build the filter from FOKUS_LOG, falling back to the configured level
fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize file logging under `log_dir`. The terminal is never written to.
pub fn init_logging(log_dir: &Path, default_level: &str) -> Result<LoggingGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "fokus.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(build_filter(default_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(LoggingGuard { _guard: guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_falls_back_on_garbage() {
        let filter = build_filter("not a [valid filter");
        assert!(!filter.to_string().is_empty());
    }

    #[test]
    fn test_build_filter_uses_default_level() {
        if std::env::var(LOG_ENV).is_err() {
            assert_eq!(build_filter("debug").to_string(), "debug");
        }
    }
}
