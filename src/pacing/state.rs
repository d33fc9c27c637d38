//! Pacing state machine.

use std::fmt;

/// Health of the request stream as seen by the pacing controller.
///
/// `Healthy` means the most recent outcome was acceptable, `Degraded` means it
/// was not. A fresh controller starts `Healthy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaceState {
    /// Last observed outcome was acceptable
    Healthy,
    /// Last observed outcome was not acceptable
    Degraded,
}

impl PaceState {
    pub(crate) fn from_prior(prior_acceptable: bool) -> Self {
        if prior_acceptable {
            PaceState::Healthy
        } else {
            PaceState::Degraded
        }
    }

    /// Lowercase name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaceState::Healthy => "healthy",
            PaceState::Degraded => "degraded",
        }
    }
}

impl fmt::Display for PaceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The action one `update` call applies to the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Acceptable after acceptable: interval unchanged
    Steady,
    /// Acceptable after not acceptable: interval halved
    Recovery,
    /// Not acceptable after anything: interval doubled
    Backoff,
}

impl Transition {
    /// Classifies an update by the previous and the new outcome.
    ///
    /// | previous   | new        | transition |
    /// |------------|------------|------------|
    /// | acceptable | acceptable | `Steady`   |
    /// | rejected   | acceptable | `Recovery` |
    /// | either     | rejected   | `Backoff`  |
    pub fn classify(prior_acceptable: bool, new_acceptable: bool) -> Self {
        match (prior_acceptable, new_acceptable) {
            (true, true) => Transition::Steady,
            (false, true) => Transition::Recovery,
            (_, false) => Transition::Backoff,
        }
    }

    /// Lowercase name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Steady => "steady",
            Transition::Recovery => "recovery",
            Transition::Backoff => "backoff",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
