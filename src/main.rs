//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `request_pacer` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Ctrl-C handling
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

use request_pacer::initialization::init_logger_with;
use request_pacer::{
    run_paced_with_cancel, shutdown_on_ctrl_c, stop_ctrl_c_listener, Config, LogFormat,
};

/// Exit code conventionally used after SIGINT
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_format = config.log_format.clone();
    init_logger_with(config.log_level.clone().into(), log_format.clone())
        .context("Failed to initialize logger")?;

    let cancel = CancellationToken::new();
    let ctrl_c = shutdown_on_ctrl_c(cancel.clone());

    let result = run_paced_with_cancel(config, cancel.clone()).await;
    // Stop the Ctrl-C listener if the run finished on its own
    stop_ctrl_c_listener(&cancel, ctrl_c).await;

    match result {
        Ok(report) => {
            match log_format {
                LogFormat::Json => {
                    println!("{}", serde_json::to_string(&report)?);
                }
                LogFormat::Plain => {
                    println!(
                        "Requested {} URL{} ({} acceptable, {} given up) with {} request{} in {:.1}s; final interval {}",
                        report.total_urls,
                        if report.total_urls == 1 { "" } else { "s" },
                        report.acceptable,
                        report.rejected,
                        report.requests,
                        if report.requests == 1 { "" } else { "s" },
                        report.elapsed_seconds,
                        report.final_interval
                    );
                }
            }
            if report.cancelled {
                process::exit(EXIT_INTERRUPTED);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("request_pacer error: {:#}", e);
            process::exit(1);
        }
    }
}
