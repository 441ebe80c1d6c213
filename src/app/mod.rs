//! Command-line application helpers.
//!
//! This module provides URL validation, progress logging, run statistics,
//! and report rendering used by the run loop and the binary.

pub mod logging;
pub mod output;
pub mod statistics;
pub mod url;

// Re-export public API
pub use logging::log_progress;
pub use output::render_reports;
pub use statistics::{print_error_statistics, print_run_summary, record_report_statistics};
pub use url::validate_and_normalize_url;
