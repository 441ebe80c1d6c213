//! Error categorization.
//!
//! Maps fetch failures onto the [`ErrorType`] counters.

use super::stats::ProcessingStats;
use super::types::{ErrorType, FetchError};

/// Categorizes a `reqwest::Error` into an `ErrorType`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if let Some(status) = error.status() {
        return categorize_status(status.as_u16());
    }

    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Maps an HTTP status code to an `ErrorType`.
pub fn categorize_status(status: u16) -> ErrorType {
    match status {
        403 => ErrorType::HttpRequestBotDetectionError,
        404 => ErrorType::HttpRequestNotFound,
        429 => ErrorType::HttpRequestTooManyRequests,
        500..=599 => ErrorType::HttpRequestServerError,
        _ => ErrorType::HttpRequestOtherError,
    }
}

/// Categorizes a [`FetchError`].
pub fn categorize_fetch_error(error: &FetchError) -> ErrorType {
    match error {
        FetchError::Request(e) => categorize_reqwest_error(e),
        FetchError::Status { status, .. } => categorize_status(*status),
        FetchError::TooLarge { .. } => ErrorType::ResponseTooLarge,
        FetchError::NotHtml { .. } => ErrorType::NonHtmlContent,
        FetchError::File { .. } => ErrorType::FileReadError,
    }
}

/// Records a fetch failure in the processing statistics.
pub fn update_error_stats(stats: &ProcessingStats, error: &FetchError) {
    stats.increment_error(categorize_fetch_error(error));
}
