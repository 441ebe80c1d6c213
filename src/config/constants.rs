//! Configuration constants.
//!
//! This module defines the defaults and limits used by the command-line
//! application: concurrency, timeouts, body size limits, and output limits.

use std::time::Duration;

/// Default number of pages analyzed concurrently (semaphore limit).
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Upper bound accepted for `--max-concurrency`.
pub const MAX_CONCURRENCY_LIMIT: usize = 500;

/// Log progress every this many completed pages.
pub const LOGGING_INTERVAL: usize = 5;

/// Default per-request HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Upper bound accepted for `--timeout-seconds`.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Minimum per-URL processing timeout (fetch plus analysis).
/// Raised to twice `--timeout-seconds` when that is longer.
pub const URL_PROCESSING_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Response and body size limits
/// Maximum response body size in bytes (2MB)
/// Responses larger than this are skipped to prevent memory exhaustion
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Maximum URL length accepted for analysis.
/// Matches common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// Default number of recommendations printed per report (0 prints all).
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 0;
