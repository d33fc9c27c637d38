//! Pacing controller implementation.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::state::{PaceState, Transition};
use crate::config::{Config, DEFAULT_MINIMUM_FLOOR};
use crate::error_handling::PacingError;

/// Result of a cancellable wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full interval elapsed
    Elapsed,
    /// The cancellation token fired first
    Cancelled,
}

/// Decides how long to wait before the next request to a rate-sensitive service.
///
/// The interval doubles whenever an outcome is not acceptable and halves on the
/// first acceptable outcome after a failing streak. A successful streak leaves
/// it alone. Whenever the interval has decayed to zero it is replaced by the
/// minimum floor before doubling or halving, so the controller can always leave
/// the zero state.
///
/// One controller paces one request stream. The caller drives it strictly in
/// order: `wait()`, issue the request, `update(acceptable)`, `wait()`, ...
///
/// Intervals are counted in ticks of `unit` (one second by default).
#[derive(Debug, Clone)]
pub struct PacingController {
    start_interval: u64,
    minimum_floor: u64,
    maximum_interval: Option<u64>,
    current_interval: u64,
    prior_outcome_acceptable: bool,
    unit: Duration,
}

impl PacingController {
    /// Creates a new pacing controller.
    ///
    /// # Arguments
    ///
    /// * `start_interval` - Interval used for the very first wait
    /// * `minimum_floor` - Substitute for a zero interval (default: 1, must be > 0)
    /// * `maximum_interval` - Optional ceiling for backoff (default: unbounded)
    ///
    /// # Errors
    ///
    /// Returns `PacingError::InvalidArgument` if the floor is zero, or if the
    /// ceiling is below either the floor or the start interval.
    pub fn new(
        start_interval: u64,
        minimum_floor: Option<u64>,
        maximum_interval: Option<u64>,
    ) -> Result<Self, PacingError> {
        let minimum_floor = minimum_floor.unwrap_or(DEFAULT_MINIMUM_FLOOR);
        if minimum_floor == 0 {
            return Err(PacingError::InvalidArgument(
                "minimum floor must be positive".to_string(),
            ));
        }
        if let Some(max) = maximum_interval {
            if max < minimum_floor {
                return Err(PacingError::InvalidArgument(format!(
                    "maximum interval {max} is below the minimum floor {minimum_floor}"
                )));
            }
            if max < start_interval {
                return Err(PacingError::InvalidArgument(format!(
                    "maximum interval {max} is below the start interval {start_interval}"
                )));
            }
        }

        Ok(PacingController {
            start_interval,
            minimum_floor,
            maximum_interval,
            current_interval: start_interval,
            prior_outcome_acceptable: true,
            unit: Duration::from_secs(1),
        })
    }

    /// Builds a controller from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self, PacingError> {
        Ok(Self::new(
            config.start_interval,
            Some(config.minimum_floor),
            config.max_interval,
        )?
        .with_unit(Duration::from_millis(config.interval_unit_ms)))
    }

    /// Sets the duration of one interval tick.
    pub fn with_unit(mut self, unit: Duration) -> Self {
        self.unit = unit;
        self
    }

    /// Suspends the calling task for the current interval.
    pub async fn wait(&self) {
        let wait = self.current_wait();
        if wait.is_zero() {
            return;
        }
        tokio::time::sleep(wait).await;
    }

    /// Suspends for the current interval unless `cancel` fires first.
    pub async fn wait_or_cancel(&self, cancel: &CancellationToken) -> WaitOutcome {
        if cancel.is_cancelled() {
            return WaitOutcome::Cancelled;
        }
        tokio::select! {
            _ = self.wait() => WaitOutcome::Elapsed,
            _ = cancel.cancelled() => {
                log::debug!("Pacing wait of {:?} cancelled", self.current_wait());
                WaitOutcome::Cancelled
            }
        }
    }

    /// Advances the interval after a completed request.
    ///
    /// `is_acceptable` is the caller's judgment that the response needs no
    /// retry and did not trip throttling. Returns the transition applied.
    pub fn update(&mut self, is_acceptable: bool) -> Transition {
        let transition = Transition::classify(self.prior_outcome_acceptable, is_acceptable);
        let previous = self.current_interval;

        match transition {
            Transition::Steady => {}
            Transition::Recovery => {
                self.apply_zero_floor();
                self.current_interval /= 2;
            }
            Transition::Backoff => {
                self.apply_zero_floor();
                let doubled = self.current_interval.saturating_mul(2);
                self.current_interval = match self.maximum_interval {
                    Some(max) => doubled.min(max),
                    None => doubled,
                };
            }
        }

        // Must be written on every branch, otherwise recovery is unreachable.
        self.prior_outcome_acceptable = is_acceptable;

        if previous != self.current_interval {
            log::info!(
                "Pacing {}: interval {} → {} (state: {})",
                transition,
                previous,
                self.current_interval,
                self.state()
            );
        } else {
            log::trace!(
                "Pacing {}: interval stays {} (state: {})",
                transition,
                self.current_interval,
                self.state()
            );
        }

        transition
    }

    /// Returns to the start interval and the healthy state.
    pub fn reset(&mut self) {
        self.current_interval = self.start_interval;
        self.prior_outcome_acceptable = true;
    }

    fn apply_zero_floor(&mut self) {
        if self.current_interval == 0 {
            self.current_interval = self.minimum_floor;
        }
    }

    /// Current interval in ticks.
    pub fn current_interval(&self) -> u64 {
        self.current_interval
    }

    /// Current interval as a duration, saturating at `Duration::MAX`.
    pub fn current_wait(&self) -> Duration {
        scale(self.unit, self.current_interval)
    }

    /// Interval the controller was constructed with.
    pub fn start_interval(&self) -> u64 {
        self.start_interval
    }

    /// Value substituted for a zero interval.
    pub fn minimum_floor(&self) -> u64 {
        self.minimum_floor
    }

    /// Backoff ceiling, if any.
    pub fn maximum_interval(&self) -> Option<u64> {
        self.maximum_interval
    }

    /// Duration of one tick.
    pub fn unit(&self) -> Duration {
        self.unit
    }

    /// Healthy if the last outcome was acceptable (or none was seen yet).
    pub fn state(&self) -> PaceState {
        PaceState::from_prior(self.prior_outcome_acceptable)
    }
}

// Remainder is below one second, so the cast to u32 never truncates
#[allow(clippy::cast_possible_truncation)]
fn scale(unit: Duration, ticks: u64) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let nanos = unit.as_nanos().saturating_mul(u128::from(ticks));
    match u64::try_from(nanos / NANOS_PER_SEC) {
        Ok(secs) => Duration::new(secs, (nanos % NANOS_PER_SEC) as u32),
        Err(_) => Duration::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(controller: &mut PacingController, outcomes: &[bool]) -> Vec<u64> {
        let mut seen = vec![controller.current_interval()];
        for &ok in outcomes {
            controller.update(ok);
            seen.push(controller.current_interval());
        }
        seen
    }

    #[test]
    fn test_new_with_defaults() {
        let controller = PacingController::new(5, None, None).unwrap();
        assert_eq!(controller.current_interval(), 5);
        assert_eq!(controller.start_interval(), 5);
        assert_eq!(controller.minimum_floor(), 1);
        assert_eq!(controller.maximum_interval(), None);
        assert_eq!(controller.unit(), Duration::from_secs(1));
        assert_eq!(controller.state(), PaceState::Healthy);
    }

    #[test]
    fn test_new_rejects_zero_floor() {
        let result = PacingController::new(1, Some(0), None);
        assert!(matches!(result, Err(PacingError::InvalidArgument(_))));
    }

    #[test]
    fn test_new_rejects_ceiling_below_floor() {
        let result = PacingController::new(0, Some(4), Some(2));
        assert!(matches!(result, Err(PacingError::InvalidArgument(_))));
    }

    #[test]
    fn test_new_rejects_ceiling_below_start() {
        let result = PacingController::new(10, None, Some(8));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("start interval"));
    }

    #[test]
    fn test_first_update_acceptable_is_noop() {
        let mut controller = PacingController::new(3, None, None).unwrap();
        assert_eq!(controller.update(true), Transition::Steady);
        assert_eq!(controller.current_interval(), 3);
    }

    #[test]
    fn test_backoff_doubles_and_degrades() {
        let mut controller = PacingController::new(3, None, None).unwrap();
        assert_eq!(controller.update(false), Transition::Backoff);
        assert_eq!(controller.current_interval(), 6);
        assert_eq!(controller.state(), PaceState::Degraded);
    }

    #[test]
    fn test_recovery_is_reachable() {
        let mut controller = PacingController::new(8, None, None).unwrap();
        controller.update(false);
        assert_eq!(controller.update(true), Transition::Recovery);
        assert_eq!(controller.current_interval(), 8);
        assert_eq!(controller.state(), PaceState::Healthy);
    }

    #[test]
    fn test_recovery_rounds_toward_zero() {
        let mut controller = PacingController::new(7, None, Some(7)).unwrap();
        controller.update(false); // clamped at 7
        controller.update(true);
        assert_eq!(controller.current_interval(), 3);
    }

    #[test]
    fn test_zero_floor_on_backoff() {
        let mut controller = PacingController::new(0, Some(5), None).unwrap();
        controller.update(false);
        assert_eq!(controller.current_interval(), 10);
    }

    #[test]
    fn test_zero_floor_on_recovery() {
        let mut controller = PacingController {
            current_interval: 0,
            prior_outcome_acceptable: false,
            ..PacingController::new(0, Some(6), None).unwrap()
        };
        assert_eq!(controller.update(true), Transition::Recovery);
        assert_eq!(controller.current_interval(), 3);
    }

    #[test]
    fn test_zero_floor_on_recovery_with_unit_floor() {
        let mut controller = PacingController {
            current_interval: 0,
            prior_outcome_acceptable: false,
            ..PacingController::new(0, None, None).unwrap()
        };
        controller.update(true);
        assert_eq!(controller.current_interval(), 0);
        // Zero is left again on the next failure
        controller.update(false);
        assert_eq!(controller.current_interval(), 2);
    }

    #[test]
    fn test_zero_floor_recovery_from_zero_while_degraded() {
        // Ceiling of 1 with floor 1 lets a degraded controller sit at zero
        let mut controller = PacingController::new(1, Some(1), Some(1)).unwrap();
        controller.update(false); // 1 -> 2 clamped to 1
        controller.update(true); // 1 -> 0
        assert_eq!(controller.current_interval(), 0);
        controller.update(false); // 0 -> 1 -> 2 clamped to 1
        assert_eq!(controller.current_interval(), 1);
    }

    #[test]
    fn test_concrete_scenario() {
        let mut controller = PacingController::new(1, None, None).unwrap();
        let seen = drive(&mut controller, &[false, false, true, true, false]);
        assert_eq!(seen, vec![1, 2, 4, 2, 2, 4]);
    }

    #[test]
    fn test_ceiling_clamps_backoff() {
        let mut controller = PacingController::new(3, None, Some(10)).unwrap();
        let seen = drive(&mut controller, &[false, false, false]);
        assert_eq!(seen, vec![3, 6, 10, 10]);
    }

    #[test]
    fn test_unbounded_backoff_saturates() {
        let mut controller = PacingController::new(u64::MAX / 2 + 1, None, None).unwrap();
        controller.update(false);
        assert_eq!(controller.current_interval(), u64::MAX);
        controller.update(false);
        assert_eq!(controller.current_interval(), u64::MAX);
    }

    #[test]
    fn test_reset() {
        let mut controller = PacingController::new(2, None, None).unwrap();
        controller.update(false);
        controller.update(false);
        controller.reset();
        assert_eq!(controller.current_interval(), 2);
        assert_eq!(controller.state(), PaceState::Healthy);
        assert_eq!(controller.update(true), Transition::Steady);
    }

    #[test]
    fn test_current_wait_uses_unit() {
        let controller = PacingController::new(3, None, None)
            .unwrap()
            .with_unit(Duration::from_millis(250));
        assert_eq!(controller.current_wait(), Duration::from_millis(750));
    }

    #[test]
    fn test_current_wait_saturates() {
        let controller = PacingController::new(u64::MAX, None, None)
            .unwrap()
            .with_unit(Duration::from_secs(10));
        assert_eq!(controller.current_wait(), Duration::MAX);
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            start_interval: 4,
            minimum_floor: 2,
            max_interval: Some(64),
            interval_unit_ms: 10,
            ..Default::default()
        };
        let controller = PacingController::from_config(&config).unwrap();
        assert_eq!(controller.current_interval(), 4);
        assert_eq!(controller.minimum_floor(), 2);
        assert_eq!(controller.maximum_interval(), Some(64));
        assert_eq!(controller.current_wait(), Duration::from_millis(40));
    }

    #[test]
    fn test_from_config_invalid_floor() {
        let config = Config {
            minimum_floor: 0,
            ..Default::default()
        };
        assert!(PacingController::from_config(&config).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_sleeps_for_current_interval() {
        let controller = PacingController::new(3, None, None).unwrap();
        let start = tokio::time::Instant::now();
        controller.wait().await;
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_zero_returns_immediately() {
        let controller = PacingController::new(0, None, None).unwrap();
        let start = tokio::time::Instant::now();
        controller.wait().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_or_cancel_elapsed() {
        let controller = PacingController::new(2, None, None).unwrap();
        let cancel = CancellationToken::new();
        assert_eq!(controller.wait_or_cancel(&cancel).await, WaitOutcome::Elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_or_cancel_interrupted() {
        let controller = PacingController::new(3600, None, None).unwrap();
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let start = tokio::time::Instant::now();
        let outcome = controller.wait_or_cancel(&cancel).await;
        assert_eq!(outcome, WaitOutcome::Cancelled);
        assert!(start.elapsed() < Duration::from_secs(3600));
    }

    #[tokio::test]
    async fn test_wait_or_cancel_already_cancelled() {
        let controller = PacingController::new(3600, None, None).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        assert_eq!(
            controller.wait_or_cancel(&cancel).await,
            WaitOutcome::Cancelled
        );
    }
}
