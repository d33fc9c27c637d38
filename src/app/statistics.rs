//! End-of-run statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{PacingStats, RejectionType};
use crate::pacing::Transition;

/// Logs verdict and transition counts gathered during a run.
pub fn print_final_statistics(stats: &PacingStats) {
    info!(
        "Responses: {} acceptable, {} rejected",
        stats.acceptable_count(),
        stats.total_rejections()
    );

    let throttled = stats.throttled_count();
    if throttled > 0 {
        info!("   throttled by server: {}", throttled);
    }

    for rejection in RejectionType::iter() {
        let count = stats.get_rejection_count(rejection);
        if count > 0 {
            info!("   {}: {}", rejection, count);
        }
    }

    info!(
        "Pacing: {} backoffs, {} recoveries, {} steady",
        stats.transition_count(Transition::Backoff),
        stats.transition_count(Transition::Recovery),
        stats.transition_count(Transition::Steady)
    );
}
