use crate::config::{LogFormat, LogLevel, LoggingConfig};
use crate::logging::{
    LogError, create_non_blocking_file, level_filter, level_to_log_level, parse_log_level,
};
use figment::Jail;
use std::io::Write;
use std::sync::Once;
use std::time::{Duration, Instant};
use tempfile::tempdir;
use tracing::level_filters::LevelFilter;

// Use this to ensure init is only called once across all tests
static INIT: Once = Once::new();

#[test]
fn test_init_console_logging() {
    INIT.call_once(|| {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            file: None,
            console: true,
        };

        assert!(crate::logging::init(&config).is_ok());
    });
}

#[test]
fn test_init_twice_is_harmless() {
    let config = LoggingConfig::default();
    assert!(crate::logging::init(&config).is_ok());
    assert!(crate::logging::init(&config).is_ok());
}

#[test]
fn test_init_without_any_output_is_noop() {
    let config = LoggingConfig {
        console: false,
        ..LoggingConfig::default()
    };
    assert!(crate::logging::init(&config).is_ok());
}

// The file writer is process-wide, so every check that installs it lives here.
#[test]
fn test_file_writer_is_created_once_and_reused() {
    let temp_dir = tempdir().unwrap();
    let log_path = temp_dir.path().join("nested").join("dir").join("kgextract.log");

    assert!(create_non_blocking_file(&log_path).is_ok());
    assert!(log_path.parent().unwrap().exists());

    // A second request for the same file still reaches a live worker
    let mut again = create_non_blocking_file(&log_path).unwrap();
    again.write_all(b"still flushing\n").unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let contents = std::fs::read_to_string(&log_path).unwrap_or_default();
        if contents.contains("still flushing") {
            break;
        }
        assert!(Instant::now() < deadline, "reused writer never flushed");
        std::thread::sleep(Duration::from_millis(20));
    }

    let other = temp_dir.path().join("other.log");
    match create_non_blocking_file(&other) {
        Err(LogError::IoError(e)) => assert_eq!(e.kind(), std::io::ErrorKind::AlreadyExists),
        result => panic!("expected AlreadyExists, got {:?}", result.map(|_| ())),
    }
}

#[test]
fn test_file_writer_rejects_path_without_name() {
    let err = create_non_blocking_file("/").unwrap_err();
    assert!(matches!(err, LogError::IoError(_)));
}

#[test]
fn test_forced_level_wins_over_rust_log() {
    Jail::expect_with(|jail| {
        jail.set_env("RUST_LOG", "trace");
        let config = LoggingConfig {
            level: LogLevel::Info,
            ..LoggingConfig::default()
        };

        assert_eq!(
            level_filter(&config, None).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
        assert_eq!(
            level_filter(&config, Some(LogLevel::Error)).max_level_hint(),
            Some(LevelFilter::ERROR)
        );
        Ok(())
    });
}

#[test]
fn test_level_conversion() {
    assert_eq!(parse_log_level("trace").unwrap(), LogLevel::Trace);
    assert_eq!(parse_log_level("DEBUG").unwrap(), LogLevel::Debug);
    assert!(parse_log_level("info").is_ok());
    assert!(parse_log_level("warn").is_ok());
    assert!(parse_log_level("error").is_ok());
    assert!(matches!(
        parse_log_level("invalid"),
        Err(LogError::InvalidLogLevel(_))
    ));

    assert_eq!(level_to_log_level(tracing::Level::TRACE), LogLevel::Trace);
    assert_eq!(level_to_log_level(tracing::Level::DEBUG), LogLevel::Debug);
    assert_eq!(level_to_log_level(tracing::Level::INFO), LogLevel::Info);
    assert_eq!(level_to_log_level(tracing::Level::WARN), LogLevel::Warn);
    assert_eq!(level_to_log_level(tracing::Level::ERROR), LogLevel::Error);
}
