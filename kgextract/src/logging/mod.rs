//! Structured logging infrastructure for kgextract.
//!
//! This module provides a configurable logging system based on the tracing crate,
//! supporting different output formats, log levels and optional file output.
//! `RUST_LOG`, when set, overrides the configured level unless the caller
//! forces one with [`init_with_level`].

#[cfg(test)]
mod tests;

use crate::config::{LogFormat, LogLevel, LoggingConfig};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

/// The process-wide file writer. Its guard keeps the worker flushing until exit.
static FILE_WRITER: OnceLock<FileWriter> = OnceLock::new();

#[derive(Debug)]
struct FileWriter {
    path: PathBuf,
    writer: NonBlocking,
    _guard: WorkerGuard,
}

/// Error type for logging operations
#[derive(Debug)]
pub enum LogError {
    /// IO error occurred
    IoError(std::io::Error),

    /// Error parsing log level
    InvalidLogLevel(String),

    /// Error in subscriber setup
    SubscriberError(Box<dyn std::error::Error + Send + Sync>),
}

impl From<std::io::Error> for LogError {
    fn from(err: std::io::Error) -> Self {
        LogError::IoError(err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for LogError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        LogError::SubscriberError(err)
    }
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Install a fmt subscriber builder with the shared settings.
macro_rules! init_with {
    ($builder:expr, $filter:expr, $writer:expr) => {{
        let builder = $builder
            .with_env_filter($filter)
            .with_level(true)
            .with_target(true)
            .with_line_number(true);

        match $writer {
            Some(writer) => builder.with_writer(writer).try_init().map_err(LogError::from),
            None => builder.with_writer(std::io::stderr).try_init().map_err(LogError::from),
        }
    }};
}

/// Initialize the logging system with the given configuration.
///
/// Calling this more than once is harmless; only the first call installs a
/// subscriber.
pub fn init(config: &LoggingConfig) -> Result<()> {
    install(config, level_filter(config, None))
}

/// Like [`init`], but `level` wins over both `RUST_LOG` and `config.level`.
pub fn init_with_level(config: &LoggingConfig, level: LogLevel) -> Result<()> {
    install(config, level_filter(config, Some(level)))
}

fn level_filter(config: &LoggingConfig, forced: Option<LogLevel>) -> EnvFilter {
    match forced {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string())),
    }
}

fn install(config: &LoggingConfig, filter: EnvFilter) -> Result<()> {

    let writer = match (&config.file, config.console) {
        (Some(path), false) => Some(create_non_blocking_file(path)?),
        _ => None,
    };

    if writer.is_none() && !config.console {
        return Ok(());
    }

    let result = match config.format {
        LogFormat::Json => init_with!(tracing_subscriber::fmt().json(), filter, writer),
        LogFormat::Compact => init_with!(tracing_subscriber::fmt().compact(), filter, writer),
        LogFormat::Pretty => init_with!(tracing_subscriber::fmt().pretty(), filter, writer),
        LogFormat::Default => init_with!(tracing_subscriber::fmt(), filter, writer),
    };

    // A subscriber installed earlier (by a test harness or the host application) wins
    if let Err(LogError::SubscriberError(ref e)) = result
        && e.to_string().contains("already")
    {
        return Ok(());
    }

    if result.is_ok() && config.console && config.file.is_some() {
        // we can't easily log to both console and file with this setup
        tracing::warn!("Configured for console only; file logging ignored");
    }

    result
}

/// Create the non-blocking file writer, keeping its worker alive.
///
/// Only one log file exists per process. Asking again for the same path
/// hands back the running writer; any other path is refused.
fn create_non_blocking_file(path: impl AsRef<Path>) -> Result<NonBlocking> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("log path has no file name: {}", path.display()),
        )
    })?;

    if FILE_WRITER.get().is_some() {
        return existing_file_writer(path);
    }

    let file_appender = tracing_appender::rolling::never(
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new(".")),
        file_name,
    );

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let file_writer = FileWriter {
        path: path.to_path_buf(),
        writer: non_blocking.clone(),
        _guard: guard,
    };

    match FILE_WRITER.set(file_writer) {
        Ok(()) => Ok(non_blocking),
        // Lost a race with another caller; ours shuts down unused
        Err(_) => existing_file_writer(path),
    }
}

fn existing_file_writer(path: &Path) -> Result<NonBlocking> {
    match FILE_WRITER.get() {
        Some(existing) if existing.path == path => Ok(existing.writer.clone()),
        Some(existing) => Err(LogError::IoError(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!(
                "file logging already writes to {}",
                existing.path.display()
            ),
        ))),
        None => Err(LogError::IoError(std::io::Error::other(
            "file logging is not initialized",
        ))),
    }
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level.parse().map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

/// Convert a tracing::Level to a LogLevel enum.
pub fn level_to_log_level(level: Level) -> LogLevel {
    match level {
        Level::TRACE => LogLevel::Trace,
        Level::DEBUG => LogLevel::Debug,
        Level::INFO => LogLevel::Info,
        Level::WARN => LogLevel::Warn,
        Level::ERROR => LogLevel::Error,
    }
}

impl std::fmt::Display for LogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogError::IoError(e) => write!(f, "IO error: {}", e),
            LogError::SubscriberError(e) => write!(f, "Subscriber error: {}", e),
            LogError::InvalidLogLevel(s) => write!(f, "Invalid log level: {}", s),
        }
    }
}

impl std::error::Error for LogError {}
