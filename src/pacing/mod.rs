//! Adaptive request pacing.
//!
//! This module implements a single-interval pacing controller for one request
//! stream against a rate-sensitive service:
//! - Doubles the wait interval on every response that is not acceptable
//! - Halves it on the first acceptable response after a failing streak
//! - Leaves it unchanged while responses keep being acceptable
//! - Substitutes a minimum floor for a zero interval before doubling or halving
//!
//! The caller decides what "acceptable" means; the controller never looks at
//! responses itself.

mod controller;
mod state;

pub use controller::{PacingController, WaitOutcome};
pub use state::{PaceState, Transition};
