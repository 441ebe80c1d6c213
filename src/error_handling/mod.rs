//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (analyzer, fetch, configuration, initialization)
//! - Processing statistics tracking (errors, warnings, info metrics)
//! - Fetch error categorization
//!
//! Statistic types are categorized into:
//! - **Errors**: Failures that prevent a report or leave parts of it empty
//! - **Warnings**: Missing signals and degraded reports
//! - **Info**: Informational metrics (redirects, cache hits, etc.)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::update_error_stats;
pub use stats::ProcessingStats;
pub use types::{
    AnalyzerError, ConfigValidationError, ErrorType, FetchError, InfoType, InitializationError,
    WarningType,
};
