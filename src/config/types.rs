//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_INTERVAL_UNIT_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_MINIMUM_FLOOR, DEFAULT_START_INTERVAL,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options and library configuration.
///
/// Parsed by `clap` in the binary, or built programmatically with
/// `..Default::default()`.
///
/// # Examples
///
/// ```bash
/// # One second between requests, doubling on 429/5xx/timeouts
/// request_pacer urls.txt
///
/// # Start with no delay, 250ms ticks, never wait more than 64 ticks
/// request_pacer urls.txt --start-interval 0 --interval-unit-ms 250 --max-interval 64
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "request_pacer",
    about = "Requests a list of URLs one after another, adapting the pause between requests to how the server responds."
)]
pub struct Config {
    /// File with one URL per line
    #[arg(value_parser)]
    pub file: PathBuf,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Interval before the first request, in ticks
    #[arg(long, default_value_t = DEFAULT_START_INTERVAL)]
    pub start_interval: u64,

    /// Value substituted for a zero interval before doubling or halving (must be > 0)
    #[arg(long, default_value_t = DEFAULT_MINIMUM_FLOOR)]
    pub minimum_floor: u64,

    /// Upper bound for the interval, in ticks (unbounded when omitted)
    #[arg(long)]
    pub max_interval: Option<u64>,

    /// Length of one tick in milliseconds
    #[arg(long, default_value_t = DEFAULT_INTERVAL_UNIT_MS)]
    pub interval_unit_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Requests per URL before giving up while responses are not acceptable
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("urls.txt"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            start_interval: DEFAULT_START_INTERVAL,
            minimum_floor: DEFAULT_MINIMUM_FLOOR,
            max_interval: None,
            interval_unit_ms: DEFAULT_INTERVAL_UNIT_MS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}
