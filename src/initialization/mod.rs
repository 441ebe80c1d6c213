//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of a run:
//! - Logger
//! - HTTP client
//! - Concurrency semaphore
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Initializes a semaphore for controlling concurrency.
///
/// Creates a new semaphore with the specified permit count. This semaphore is used
/// to limit the number of pages fetched and analyzed at once.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}
