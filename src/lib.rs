//! seo_analyzer library: scored SEO reports for web pages
//!
//! This library parses a page's HTML once and runs independent analyzers
//! over it (metadata, content quality, technical SEO, mobile-friendliness,
//! keyword usage and competitive content benchmarks). Their scores and
//! recommendations are merged into a single [`Report`] with a weighted
//! overall score.
//!
//! # Example
//!
//! ```
//! let report = seo_analyzer::analyze(
//!     "https://example.com/",
//!     "<html><head><title>Handmade oak furniture</title></head><body></body></html>",
//! );
//! assert!(report.overall_score <= 100);
//! assert!(report.recommendations.iter().any(|r| r.contains("H1")));
//! ```
//!
//! Multi-page runs that fetch HTML over HTTP are available through
//! [`run_analysis`], which requires a Tokio runtime.

pub mod analyzers;
mod app;
pub mod collaborators;
pub mod config;
pub mod document;
mod error_handling;
mod fetch;
pub mod initialization;
pub mod report;
mod run;
mod utils;

// Re-export public API
pub use app::{render_reports, validate_and_normalize_url};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use error_handling::{
    AnalyzerError, ConfigValidationError, ErrorType, FetchError, InfoType, InitializationError,
    ProcessingStats, WarningType,
};
pub use report::{AnalyzerSet, PageMetrics, Report, ReportAggregator};
pub use run::{run_analysis, run_analysis_with, RunReport};

/// Analyzes one page with no collaborators attached.
///
/// Shorthand for `ReportAggregator::new().analyze(url, html)`.
pub fn analyze(url: &str, html: &str) -> Report {
    ReportAggregator::new().analyze(url, html)
}
