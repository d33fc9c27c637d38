//! Error handling and pacing statistics.
//!
//! This module provides:
//! - Error type definitions (`PacingError`, `InitializationError`)
//! - Response verdicts and rejection categories
//! - Categorization of HTTP statuses and transport errors
//! - Thread-safe statistics for verdicts and pacing transitions

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{judge_reqwest_error, judge_status};
pub use stats::PacingStats;
pub use types::{InitializationError, PacingError, RejectionType, Verdict};
