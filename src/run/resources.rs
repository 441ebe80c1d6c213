//! Run resources and per-task parameters.

use std::path::PathBuf;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::collaborators::ReportCache;
use crate::error_handling::ProcessingStats;
use crate::report::ReportAggregator;

/// State shared by every page task of a run.
pub struct AnalysisContext {
    pub client: Arc<reqwest::Client>,
    pub aggregator: ReportAggregator,
    /// Keyed by normalized URL; repeated URLs in one run are analyzed once.
    pub cache: Arc<dyn ReportCache>,
    pub error_stats: Arc<ProcessingStats>,
    /// Saved page to analyze instead of fetching.
    pub local_html: Option<PathBuf>,
}

/// Everything initialized before the task loop starts.
pub struct RunResources {
    pub ctx: Arc<AnalysisContext>,
    /// Concurrency semaphore to limit parallel pages
    pub semaphore: Arc<Semaphore>,
    pub processing_timeout: Duration,
    /// Count of pages that produced a report
    pub completed_urls: Arc<AtomicUsize>,
    /// Count of pages that failed or timed out
    pub failed_urls: Arc<AtomicUsize>,
    pub start_time: Instant,
}

/// Inputs of one spawned page task.
pub struct UrlTaskParams {
    /// Position in the input, used to restore input order.
    pub index: usize,
    pub url: Arc<str>,
    pub ctx: Arc<AnalysisContext>,
    pub permit: OwnedSemaphorePermit,
    pub processing_timeout: Duration,
    pub completed_urls: Arc<AtomicUsize>,
    pub failed_urls: Arc<AtomicUsize>,
    pub total_urls: usize,
    pub start_time: Instant,
}
