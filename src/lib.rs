//! request_pacer library: adaptive pacing for one stream of requests
//!
//! The core is [`PacingController`], which decides how long to wait before the
//! next request to a rate-sensitive service. It doubles the wait whenever a
//! response is not acceptable and halves it when the service recovers.
//!
//! # Example
//!
//! ```no_run
//! use request_pacer::PacingController;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pacer = PacingController::new(1, None, None)?;
//! for url in ["https://api.example.com/a", "https://api.example.com/b"] {
//!     pacer.wait().await;
//!     let status = reqwest::get(url).await?.status();
//!     pacer.update(status.is_success());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`run_paced`] wraps the same loop around a file of URLs, judging each
//! response by its status code.
//!
//! # Requirements
//!
//! Waiting requires a Tokio runtime.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod pacing;

// Re-export public API
pub use app::{shutdown_on_ctrl_c, stop_ctrl_c_listener};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{PacingError, RejectionType, Verdict};
pub use pacing::{PaceState, PacingController, Transition, WaitOutcome};
pub use run::{run_paced, run_paced_with_cancel, PaceReport};

// Internal run module (contains the paced request loop)
mod run {
    use anyhow::{Context, Result};
    use log::{debug, info, warn};
    use serde::Serialize;
    use std::time::Instant;
    use tokio::io::{AsyncBufReadExt, BufReader};
    use tokio_util::sync::CancellationToken;

    use crate::app::{log_progress, print_final_statistics, validate_and_normalize_url};
    use crate::config::{Config, LOGGING_INTERVAL};
    use crate::error_handling::{judge_reqwest_error, judge_status, PacingStats, Verdict};
    use crate::initialization::init_client;
    use crate::pacing::{PacingController, Transition, WaitOutcome};

    /// Results of a paced run.
    #[derive(Debug, Clone, Serialize)]
    pub struct PaceReport {
        /// Number of valid URLs read from the input
        pub total_urls: usize,
        /// URLs that eventually got an acceptable response
        pub acceptable: usize,
        /// URLs given up on after `max_attempts` unacceptable responses
        pub rejected: usize,
        /// Requests issued, including repeats
        pub requests: usize,
        /// Times the interval was doubled
        pub backoffs: usize,
        /// Times the interval was halved
        pub recoveries: usize,
        /// Interval (in ticks) the controller ended with
        pub final_interval: u64,
        /// Whether the run was stopped before reaching the end of the input
        pub cancelled: bool,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Requests every URL in `config.file`, one at a time, paced adaptively.
    ///
    /// Equivalent to [`run_paced_with_cancel`] with a token that is never
    /// cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the pacing configuration is invalid, the HTTP
    /// client cannot be built, or the input file cannot be read.
    pub async fn run_paced(config: Config) -> Result<PaceReport> {
        run_paced_with_cancel(config, CancellationToken::new()).await
    }

    /// Requests every URL in `config.file`, stopping early when `cancel` fires.
    ///
    /// One controller paces the whole file. Before each request the loop waits
    /// for the current interval; afterwards the response is judged and fed back
    /// with `update`. A URL whose response is not acceptable is requested again
    /// (after the next, longer, wait) until it succeeds or `max_attempts`
    /// requests have been made for it.
    ///
    /// Cancellation is not an error: the report comes back with
    /// `cancelled == true`.
    pub async fn run_paced_with_cancel(
        config: Config,
        cancel: CancellationToken,
    ) -> Result<PaceReport> {
        let start_time = Instant::now();

        let mut controller =
            PacingController::from_config(&config).context("Invalid pacing configuration")?;
        let client = init_client(&config).context("Failed to initialize HTTP client")?;

        let file = tokio::fs::File::open(&config.file)
            .await
            .with_context(|| format!("Failed to open input file {}", config.file.display()))?;
        let mut lines = BufReader::new(file).lines();

        info!(
            "Pacing requests from {} (start interval {} x {:?}, floor {}, ceiling {})",
            config.file.display(),
            controller.start_interval(),
            controller.unit(),
            controller.minimum_floor(),
            controller
                .maximum_interval()
                .map_or_else(|| "none".to_string(), |max| max.to_string())
        );

        let stats = PacingStats::new();
        let mut total_urls = 0;
        let mut acceptable = 0;
        let mut rejected = 0;
        let mut requests = 0;
        let mut cancelled = false;

        'urls: while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read input file")?
        {
            let Some(url) = validate_and_normalize_url(&line) else {
                continue;
            };
            total_urls += 1;

            let mut attempt = 0;
            loop {
                attempt += 1;
                if controller.wait_or_cancel(&cancel).await == WaitOutcome::Cancelled {
                    cancelled = true;
                    break 'urls;
                }

                let verdict = fetch_and_judge(&client, &url).await;
                requests += 1;
                stats.record_verdict(verdict);
                stats.record_transition(controller.update(verdict.is_acceptable()));

                if requests % LOGGING_INTERVAL == 0 {
                    log_progress(start_time, requests, &controller);
                }

                match verdict {
                    Verdict::Acceptable => {
                        debug!("{url}: acceptable (attempt {attempt})");
                        acceptable += 1;
                        break;
                    }
                    Verdict::Rejected(reason) if attempt >= config.max_attempts => {
                        warn!("Giving up on {url} after {attempt} attempts: {reason}");
                        rejected += 1;
                        break;
                    }
                    Verdict::Rejected(reason) => {
                        debug!(
                            "{url}: {reason} (attempt {attempt}/{}), next wait {:?}",
                            config.max_attempts,
                            controller.current_wait()
                        );
                    }
                }
            }
        }

        if cancelled {
            warn!("Run cancelled after {requests} requests");
        }
        print_final_statistics(&stats);

        Ok(PaceReport {
            total_urls,
            acceptable,
            rejected,
            requests,
            backoffs: stats.transition_count(Transition::Backoff),
            recoveries: stats.transition_count(Transition::Recovery),
            final_interval: controller.current_interval(),
            cancelled,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    /// Issues one GET and judges the outcome.
    ///
    /// The body is drained so the connection can be reused; a body that fails
    /// to arrive makes the response unacceptable.
    async fn fetch_and_judge(client: &reqwest::Client, url: &str) -> Verdict {
        let response = match client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("{url}: request failed: {e}");
                return judge_reqwest_error(&e);
            }
        };

        let verdict = judge_status(response.status());
        match response.bytes().await {
            Ok(_) => verdict,
            Err(e) => {
                debug!("{url}: failed to read body: {e}");
                judge_reqwest_error(&e)
            }
        }
    }
}
