//! Error type definitions.
//!
//! This module defines all error, warning, and info types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Invalid configuration value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid configuration for {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending option, as spelled on the command line.
    pub field: &'static str,
    pub message: String,
}

impl ConfigValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Failure of a single analyzer run.
///
/// The report aggregator turns these into `{"error": "..."}` slots; they never
/// abort the rest of the report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    /// The page URL could not be parsed as an absolute URL.
    #[error("Invalid page URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The analyzer panicked; the payload message is preserved when it is a string.
    #[error("Analyzer panicked: {0}")]
    Panicked(String),
}

/// Errors while obtaining a page's HTML.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level or client error from reqwest.
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// Server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Response body exceeded the configured limit.
    #[error("Response body too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },

    /// Server answered with something other than HTML.
    #[error("Not an HTML page ({content_type}) at {url}")]
    NotHtml { url: String, content_type: String },

    /// Local HTML file could not be read.
    #[error("Failed to read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Types of errors that can occur while producing a report.
///
/// This enum categorizes actual error conditions - failures that prevent a
/// report from being produced or leave parts of it empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // HTTP/Network errors
    HttpRequestBuilderError,
    HttpRequestRedirectError,
    HttpRequestTimeoutError,
    HttpRequestConnectError,
    HttpRequestBodyError,
    HttpRequestDecodeError,
    HttpRequestOtherError,
    HttpRequestTooManyRequests,
    HttpRequestBotDetectionError, // 403 Forbidden - typically bot detection
    HttpRequestNotFound,          // 404 Not Found
    HttpRequestServerError,       // any 5xx
    ResponseTooLarge,
    NonHtmlContent,
    // Input errors
    InvalidUrl,
    FileReadError,
    // Analysis errors
    AnalyzerFailure,
    ProcessUrlTimeout,
}

/// Types of warnings that can occur while producing a report.
///
/// Warnings indicate missing signals that lower the score without preventing a
/// report, plus reports that came back only partially filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    MissingTitle,
    MissingMetaDescription,
    MissingH1,
    ImagesWithoutAlt,
    MissingViewport,
    DegradedReport, // At least one analyzer slot holds an error
}

/// Types of informational metrics recorded during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    HttpRedirect,  // Final URL differs from the requested one
    HttpsRedirect, // HTTP to HTTPS redirect
    CacheHit,      // Report served from the cache
    LocalFile,     // HTML read from disk instead of fetched
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::HttpRequestTooManyRequests => "Too many requests",
            ErrorType::HttpRequestBotDetectionError => "Bot detection (403 Forbidden)",
            ErrorType::HttpRequestNotFound => "Not Found (404)",
            ErrorType::HttpRequestServerError => "Server error (5xx)",
            ErrorType::ResponseTooLarge => "Response too large",
            ErrorType::NonHtmlContent => "Non-HTML content",
            ErrorType::InvalidUrl => "Invalid URL",
            ErrorType::FileReadError => "File read error",
            ErrorType::AnalyzerFailure => "Analyzer failure",
            ErrorType::ProcessUrlTimeout => "Process URL timeout",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::MissingTitle => "Missing title",
            WarningType::MissingMetaDescription => "Missing meta description",
            WarningType::MissingH1 => "Missing H1",
            WarningType::ImagesWithoutAlt => "Images without alt text",
            WarningType::MissingViewport => "Missing viewport",
            WarningType::DegradedReport => "Degraded report",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::HttpRedirect => "HTTP redirect",
            InfoType::HttpsRedirect => "HTTP to HTTPS redirect",
            InfoType::CacheHit => "Cache hit",
            InfoType::LocalFile => "Local HTML file",
        }
    }
}
