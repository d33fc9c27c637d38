//! Tests for CLI argument parsing.

use clap::Parser;
use request_pacer::{Config, LogFormat, LogLevel};
use std::path::PathBuf;

#[test]
fn test_cli_defaults() {
    let config = Config::try_parse_from(["request_pacer", "urls.txt"]).expect("Should parse");
    assert_eq!(config.file, PathBuf::from("urls.txt"));
    assert_eq!(config.start_interval, 1);
    assert_eq!(config.minimum_floor, 1);
    assert_eq!(config.max_interval, None);
    assert_eq!(config.interval_unit_ms, 1000);
    assert_eq!(config.max_attempts, 3);
    assert_eq!(
        log::LevelFilter::from(config.log_level),
        log::LevelFilter::from(LogLevel::Info)
    );
    assert!(matches!(config.log_format, LogFormat::Plain));
}

#[test]
fn test_cli_pacing_options() {
    let config = Config::try_parse_from([
        "request_pacer",
        "list.txt",
        "--start-interval",
        "0",
        "--minimum-floor",
        "2",
        "--max-interval",
        "120",
        "--interval-unit-ms",
        "250",
        "--max-attempts",
        "5",
    ])
    .expect("Should parse pacing options");

    assert_eq!(config.start_interval, 0);
    assert_eq!(config.minimum_floor, 2);
    assert_eq!(config.max_interval, Some(120));
    assert_eq!(config.interval_unit_ms, 250);
    assert_eq!(config.max_attempts, 5);
}

#[test]
fn test_cli_logging_options() {
    let config = Config::try_parse_from([
        "request_pacer",
        "urls.txt",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ])
    .expect("Should parse logging options");
    assert_eq!(
        log::LevelFilter::from(config.log_level),
        log::LevelFilter::Debug
    );
    assert!(matches!(config.log_format, LogFormat::Json));
}

#[test]
fn test_cli_requires_file() {
    assert!(Config::try_parse_from(["request_pacer"]).is_err());
}

#[test]
fn test_cli_rejects_negative_intervals() {
    assert!(Config::try_parse_from(["request_pacer", "u.txt", "--start-interval", "-3"]).is_err());
    assert!(Config::try_parse_from(["request_pacer", "u.txt", "--minimum-floor", "-1"]).is_err());
}

#[test]
fn test_cli_rejects_invalid_log_level() {
    assert!(Config::try_parse_from(["request_pacer", "u.txt", "--log-level", "loud"]).is_err());
}

#[test]
fn test_cli_accepts_zero_floor_for_later_validation() {
    // Parsing succeeds; building the controller is where a zero floor is refused
    let config = Config::try_parse_from(["request_pacer", "u.txt", "--minimum-floor", "0"])
        .expect("Should parse");
    assert!(request_pacer::PacingController::from_config(&config).is_err());
}
