//! Response categorization.
//!
//! Turns HTTP statuses and transport errors into the acceptable/rejected
//! verdict that drives the pacing controller.

use reqwest::StatusCode;

use super::types::{RejectionType, Verdict};
use crate::config::HTTP_STATUS_TOO_MANY_REQUESTS;

/// Judges a response by its status code.
///
/// 2xx and 3xx are acceptable. 429 and 5xx mean the server is struggling or
/// throttling us; other 4xx mean the request itself was refused. Informational
/// 1xx statuses never reach this point with reqwest and are treated as
/// server errors if they do.
pub fn judge_status(status: StatusCode) -> Verdict {
    if status.is_success() || status.is_redirection() {
        return Verdict::Acceptable;
    }

    let rejection = match status.as_u16() {
        HTTP_STATUS_TOO_MANY_REQUESTS => RejectionType::TooManyRequests,
        503 => RejectionType::ServiceUnavailable,
        _ if status.is_client_error() => RejectionType::ClientError,
        _ => RejectionType::ServerError,
    };
    Verdict::Rejected(rejection)
}

/// Categorizes a `reqwest::Error` into a rejection.
///
/// Errors carrying a status are judged by that status; everything else is a
/// transport failure.
pub fn judge_reqwest_error(error: &reqwest::Error) -> Verdict {
    if let Some(status) = error.status() {
        return match judge_status(status) {
            Verdict::Acceptable => Verdict::Rejected(RejectionType::OtherTransport),
            rejected => rejected,
        };
    }

    let rejection = if error.is_timeout() {
        RejectionType::Timeout
    } else if error.is_connect() {
        RejectionType::Connect
    } else {
        RejectionType::OtherTransport
    };
    Verdict::Rejected(rejection)
}
