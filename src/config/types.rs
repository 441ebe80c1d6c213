//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_RECOMMENDATIONS, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, MAX_CONCURRENCY_LIMIT, MAX_TIMEOUT_SECS,
};
use crate::error_handling::ConfigValidationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One pretty-printed JSON report per page
    Json,
    /// Human-readable summary with scores and recommendations
    Text,
}

/// Command-line options and library configuration.
///
/// Can be parsed from the command line or built programmatically.
///
/// # Examples
///
/// ```bash
/// # Analyze two pages
/// seo_analyzer example.com https://example.org/pricing
///
/// # Read URLs from a file, print text summaries
/// seo_analyzer --file urls.txt --format text --max-recommendations 10
///
/// # Analyze a saved page as if it were served from a URL
/// seo_analyzer https://example.com/ --html ./page.html
/// ```
///
/// ```no_run
/// use seo_analyzer::Config;
///
/// let config = Config {
///     urls: vec!["https://example.com/".to_string()],
///     max_concurrency: 4,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "seo_analyzer",
    about = "Analyzes web pages and prints a scored SEO report with recommendations."
)]
pub struct Config {
    /// URLs to analyze (https:// is assumed when no scheme is given)
    #[arg(value_name = "URLS")]
    pub urls: Vec<String>,

    /// File with one URL per line (blank lines and # comments are skipped)
    #[arg(long, value_parser)]
    pub file: Option<PathBuf>,

    /// Analyze this local HTML file instead of fetching; requires exactly one URL
    #[arg(long, value_parser)]
    pub html: Option<PathBuf>,

    /// Report format: json|text
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Maximum recommendations printed per report (0 prints all)
    #[arg(long, default_value_t = DEFAULT_MAX_RECOMMENDATIONS)]
    pub max_recommendations: usize,

    /// Maximum pages analyzed concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            file: None,
            html: None,
            format: OutputFormat::Json,
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Checks option values and combinations.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigValidationError`] found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.urls.is_empty() && self.file.is_none() {
            return Err(ConfigValidationError::new(
                "urls",
                "at least one URL or --file is required",
            ));
        }
        if self.html.is_some() {
            if self.file.is_some() {
                return Err(ConfigValidationError::new(
                    "html",
                    "--html cannot be combined with --file",
                ));
            }
            if self.urls.len() != 1 {
                return Err(ConfigValidationError::new(
                    "html",
                    format!("--html requires exactly one URL, got {}", self.urls.len()),
                ));
            }
        }
        if self.max_concurrency == 0 || self.max_concurrency > MAX_CONCURRENCY_LIMIT {
            return Err(ConfigValidationError::new(
                "max-concurrency",
                format!("must be between 1 and {MAX_CONCURRENCY_LIMIT}"),
            ));
        }
        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECS {
            return Err(ConfigValidationError::new(
                "timeout-seconds",
                format!("must be between 1 and {MAX_TIMEOUT_SECS}"),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "user-agent",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
