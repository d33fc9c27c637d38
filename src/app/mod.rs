//! Main application modules.
//!
//! This module provides URL list parsing, progress logging, shutdown handling,
//! and statistics printing used by the paced run.

pub mod logging;
pub mod shutdown;
pub mod statistics;
pub mod url;

// Re-export public API
pub use logging::log_progress;
pub use shutdown::{shutdown_on_ctrl_c, stop_ctrl_c_listener};
pub use statistics::print_final_statistics;
pub use url::validate_and_normalize_url;
