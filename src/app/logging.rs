//! Progress logging utilities.

use log::info;
use std::time::Instant;

use crate::pacing::PacingController;

/// Logs how many requests have been issued so far and the current pace.
pub fn log_progress(start_time: Instant, requests: usize, controller: &PacingController) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        requests as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Issued {} requests in {:.2} seconds (~{:.2} req/sec), next wait {:?} ({})",
        requests,
        elapsed_secs,
        rate,
        controller.current_wait(),
        controller.state()
    );
}
