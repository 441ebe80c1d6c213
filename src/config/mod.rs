//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, etc.)
//! - CLI option types, parsing, and validation

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, OutputFormat};
