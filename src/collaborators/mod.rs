//! Services the report aggregator depends on but does not implement.
//!
//! This module provides:
//! - [`PerformanceProvider`]: an external page-performance score
//! - [`ReportCache`]: a key-value store for finished reports, with TTL
//! - [`DescriptionGenerator`]: a natural-language page description
//!
//! The aggregator only sees these traits, so callers can plug in real API
//! clients or fakes. An in-memory cache is included for the CLI.

mod cache;
mod description;
mod performance;

pub use cache::{InMemoryReportCache, ReportCache, DEFAULT_CACHE_TTL};
pub use description::{description_source_text, DescriptionGenerator, GeneratedDescription};
pub use performance::{PerformanceProvider, PerformanceResult};
