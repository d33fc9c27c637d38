//! Error type definitions.
//!
//! This module defines the errors, verdicts and rejection categories used
//! throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Errors raised when a pacing controller is misconfigured.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacingError {
    /// A constructor argument is out of range.
    #[error("Invalid pacing argument: {0}")]
    InvalidArgument(String),
}

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Reasons a response is judged not acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum RejectionType {
    /// 429 Too Many Requests
    TooManyRequests,
    /// 503 Service Unavailable
    ServiceUnavailable,
    /// Any other 5xx
    ServerError,
    /// 4xx except 429
    ClientError,
    /// Request timed out
    Timeout,
    /// Connection could not be established
    Connect,
    /// Any other transport failure (body, decode, redirect loop)
    OtherTransport,
}

impl RejectionType {
    /// Human-readable label used in logs and summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionType::TooManyRequests => "Too many requests (429)",
            RejectionType::ServiceUnavailable => "Service unavailable (503)",
            RejectionType::ServerError => "Server error (5xx)",
            RejectionType::ClientError => "Client error (4xx)",
            RejectionType::Timeout => "Request timeout",
            RejectionType::Connect => "Connection error",
            RejectionType::OtherTransport => "Other transport error",
        }
    }

    /// Whether the server is explicitly pushing back on request rate.
    pub fn is_throttling(&self) -> bool {
        matches!(
            self,
            RejectionType::TooManyRequests | RejectionType::ServiceUnavailable
        )
    }
}

impl std::fmt::Display for RejectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The caller-side judgment of one response, fed to the pacing controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No retry needed and no sign of throttling
    Acceptable,
    /// Needs a retry, or the service pushed back
    Rejected(RejectionType),
}

impl Verdict {
    /// The boolean handed to `PacingController::update`.
    pub fn is_acceptable(&self) -> bool {
        matches!(self, Verdict::Acceptable)
    }
}
