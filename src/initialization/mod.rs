//! Application initialization.
//!
//! This module provides functions to set up shared resources:
//! - Logger (plain or JSON output)
//! - HTTP client (timeout and User-Agent)

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
