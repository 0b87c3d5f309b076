//! Logging system initialization
//!
//! Sets up the global tracing subscriber from the `[logging]` config section.

use std::path::Path;

use anyhow::{Context, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, StaticConfig};

const DEFAULT_LOG_FILE_NAME: &str = "shortly.log";

/// Initialize logging system based on configuration
///
/// `RUST_LOG` overrides `logging.level` when set. Call once, after the
/// configuration has been loaded.
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
pub fn init_logging(config: &StaticConfig) -> anyhow::Result<WorkerGuard> {
    let logging = &config.logging;
    let writer = build_writer(logging)?;
    let to_console = logging.file.as_deref().is_none_or(str::is_empty);

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{},sqlx=warn", logging.level)))
        .with_context(|| format!("Invalid log level: {}", logging.level))?;

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(to_console);

    let result = if logging.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    result.map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}

fn build_writer(logging: &LoggingConfig) -> anyhow::Result<Box<dyn std::io::Write + Send + Sync>> {
    let Some(log_file) = logging.file.as_deref().filter(|f| !f.is_empty()) else {
        return Ok(Box::new(std::io::stdout()));
    };

    if logging.enable_rotation {
        let path = Path::new(log_file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(DEFAULT_LOG_FILE_NAME);

        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(logging.max_backups.max(1) as usize)
            .build(dir)
            .context("Failed to create rolling log appender")?;
        Ok(Box::new(appender))
    } else {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("Failed to open log file: {}", log_file))?;
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_writer_plain_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let logging = LoggingConfig {
            file: Some(path.to_string_lossy().to_string()),
            enable_rotation: false,
            ..Default::default()
        };

        let mut writer = build_writer(&logging).unwrap();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_build_writer_defaults_to_stdout() {
        let logging = LoggingConfig {
            file: Some(String::new()),
            ..Default::default()
        };
        assert!(build_writer(&logging).is_ok());
    }
}
