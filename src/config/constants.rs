//! Configuration constants.
//!
//! This module defines the defaults used by the CLI and the pacing controller.

/// Default start interval, in ticks
pub const DEFAULT_START_INTERVAL: u64 = 1;

/// Default value substituted for a zero interval before doubling or halving
pub const DEFAULT_MINIMUM_FLOOR: u64 = 1;

/// Default tick length in milliseconds (one second per tick)
pub const DEFAULT_INTERVAL_UNIT_MS: u64 = 1000;

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How many times one URL is requested before giving up on it
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Log a progress line every N requests
pub const LOGGING_INTERVAL: usize = 5;

/// Maximum URL length (2048 characters), matching common browser and server limits
pub const MAX_URL_LENGTH: usize = 2048;

/// Status code servers use to signal throttling
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!("request_pacer/", env!("CARGO_PKG_VERSION"));
