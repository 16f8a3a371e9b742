//! Logging system initialization
//!
//! Sets up tracing according to the `[logging]` section of the config.

use crate::config::LoggingConfig;
use crate::errors::{MukaError, Result};
use tracing_appender::rolling;

/// Initialize logging system based on configuration
///
/// **Note**: This should be called only once during application startup,
/// after the configuration has been loaded.
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
pub fn init_logging(config: &LoggingConfig) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_file = config.file.as_deref().filter(|f| !f.is_empty());

    let writer: Box<dyn std::io::Write + Send + Sync> = match log_file {
        Some(log_file) if config.enable_rotation => {
            let path = std::path::Path::new(log_file);
            let dir = path.parent().unwrap_or(std::path::Path::new("."));
            let filename = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("muka.log");
            let appender = rolling::Builder::new()
                .rotation(rolling::Rotation::DAILY)
                .filename_prefix(filename.trim_end_matches(".log"))
                .filename_suffix("log")
                .max_log_files(config.max_backups as usize)
                .build(dir)
                .map_err(|e| {
                    MukaError::file_operation(format!(
                        "Failed to create rolling log appender: {}",
                        e
                    ))
                })?;
            Box::new(appender)
        }
        Some(log_file) => {
            // 不轮转，追加写入
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;
            Box::new(file)
        }
        None => Box::new(std::io::stdout()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.level.clone()));

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(log_file.is_none());

    let installed = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };

    installed.map_err(|e| {
        MukaError::validation(format!("Failed to install tracing subscriber: {}", e))
    })?;

    Ok(guard)
}
