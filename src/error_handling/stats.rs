//! Pacing statistics tracking.
//!
//! This module provides thread-safe counters for response verdicts and the
//! pacing transitions they caused.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{RejectionType, Verdict};
use crate::pacing::Transition;

/// Thread-safe statistics tracker for a paced run.
///
/// Every `RejectionType` is initialized to zero on creation so lookups never
/// miss. Can be shared across tasks using `Arc`.
pub struct PacingStats {
    acceptable: AtomicUsize,
    rejections: HashMap<RejectionType, AtomicUsize>,
    steady: AtomicUsize,
    recoveries: AtomicUsize,
    backoffs: AtomicUsize,
}

impl PacingStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut rejections = HashMap::new();
        for rejection in RejectionType::iter() {
            rejections.insert(rejection, AtomicUsize::new(0));
        }

        PacingStats {
            acceptable: AtomicUsize::new(0),
            rejections,
            steady: AtomicUsize::new(0),
            recoveries: AtomicUsize::new(0),
            backoffs: AtomicUsize::new(0),
        }
    }

    /// Records one judged response.
    pub fn record_verdict(&self, verdict: Verdict) {
        match verdict {
            Verdict::Acceptable => {
                self.acceptable.fetch_add(1, Ordering::Relaxed);
            }
            Verdict::Rejected(rejection) => {
                if let Some(counter) = self.rejections.get(&rejection) {
                    counter.fetch_add(1, Ordering::Relaxed);
                } else {
                    log::error!(
                        "Attempted to increment rejection counter for {:?} which is not in the map. \
                         This indicates a bug in PacingStats initialization.",
                        rejection
                    );
                }
            }
        }
    }

    /// Records the transition an update applied.
    pub fn record_transition(&self, transition: Transition) {
        let counter = match transition {
            Transition::Steady => &self.steady,
            Transition::Recovery => &self.recoveries,
            Transition::Backoff => &self.backoffs,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of acceptable responses.
    pub fn acceptable_count(&self) -> usize {
        self.acceptable.load(Ordering::SeqCst)
    }

    /// Get the count for a rejection type.
    pub fn get_rejection_count(&self, rejection: RejectionType) -> usize {
        self.rejections
            .get(&rejection)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total rejection count across all rejection types.
    pub fn total_rejections(&self) -> usize {
        RejectionType::iter()
            .map(|r| self.get_rejection_count(r))
            .sum()
    }

    /// Rejections where the server signalled overload (429 or 503).
    pub fn throttled_count(&self) -> usize {
        RejectionType::iter()
            .filter(RejectionType::is_throttling)
            .map(|r| self.get_rejection_count(r))
            .sum()
    }

    /// How often the given transition was applied.
    pub fn transition_count(&self, transition: Transition) -> usize {
        match transition {
            Transition::Steady => self.steady.load(Ordering::SeqCst),
            Transition::Recovery => self.recoveries.load(Ordering::SeqCst),
            Transition::Backoff => self.backoffs.load(Ordering::SeqCst),
        }
    }
}

impl Default for PacingStats {
    fn default() -> Self {
        Self::new()
    }
}
