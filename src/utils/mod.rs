//! Shared helpers.
//!
//! This module provides:
//! - CSS selector and regex compilation helpers
//! - Text statistics (tokens, stop words, syllables, frequencies)
//! - Ordered first-match candidate selection

mod candidates;
mod selector;
pub mod text;

pub use candidates::{first_match, Candidate};
pub use selector::{compile_regex_unsafe, parse_selector_unsafe, parse_selector_with_fallback};
