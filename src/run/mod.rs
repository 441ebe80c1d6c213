//! Multi-page analysis runs.
//!
//! A run loads and validates the input URLs, then analyzes each page in its
//! own Tokio task, bounded by a semaphore and a per-URL timeout. Every page
//! is independent; failures are logged and counted, never fatal to the run.

mod init;
mod resources;
mod task;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{info, warn};

use crate::app::{print_error_statistics, print_run_summary};
use crate::config::Config;
use crate::error_handling::ProcessingStats;
use crate::report::{Report, ReportAggregator};

use init::{init_run_resources, load_urls};
use resources::UrlTaskParams;
use task::process_url_task;

/// Outcome of [`run_analysis`].
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Reports in input order; failed pages have none.
    pub reports: Vec<Report>,
    pub total_urls: usize,
    pub successful: usize,
    pub failed: usize,
    pub elapsed_seconds: f64,
}

/// Analyzes every URL named by `config` with a default [`ReportAggregator`].
///
/// # Errors
///
/// Returns an error when the configuration is invalid, the URL file cannot be
/// read, no valid URL remains, or the HTTP client cannot be built. Individual
/// page failures are not errors.
pub async fn run_analysis(config: Config) -> Result<RunReport> {
    run_analysis_with(config, ReportAggregator::new()).await
}

/// Like [`run_analysis`], with a caller-supplied aggregator (for example one
/// carrying a performance provider or description generator).
pub async fn run_analysis_with(config: Config, aggregator: ReportAggregator) -> Result<RunReport> {
    config
        .validate()
        .context("Configuration validation failed")?;

    let error_stats = Arc::new(ProcessingStats::new());
    let urls = load_urls(&config, &error_stats).await?;
    if urls.is_empty() {
        bail!("No valid URLs to analyze");
    }
    let total_urls = urls.len();

    let resources = init_run_resources(&config, aggregator, Arc::clone(&error_stats))?;
    info!(
        "Analyzing {} page(s) with concurrency {}",
        total_urls, config.max_concurrency
    );

    let mut tasks = FuturesUnordered::new();
    for (index, url) in urls.into_iter().enumerate() {
        let permit = match Arc::clone(&resources.semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Failed to acquire semaphore permit, stopping URL processing");
                break;
            }
        };

        tasks.push(tokio::spawn(process_url_task(UrlTaskParams {
            index,
            url: Arc::from(url),
            ctx: Arc::clone(&resources.ctx),
            permit,
            processing_timeout: resources.processing_timeout,
            completed_urls: Arc::clone(&resources.completed_urls),
            failed_urls: Arc::clone(&resources.failed_urls),
            total_urls,
            start_time: resources.start_time,
        })));
    }

    let mut indexed = Vec::with_capacity(total_urls);
    while let Some(task_result) = tasks.next().await {
        match task_result {
            Ok(Some(report)) => indexed.push(report),
            Ok(None) => {}
            Err(join_error) => {
                resources.failed_urls.fetch_add(1, Ordering::SeqCst);
                warn!("Page task failed: {:?}", join_error);
            }
        }
    }
    indexed.sort_by_key(|(index, _)| *index);

    let run = RunReport {
        reports: indexed.into_iter().map(|(_, report)| report).collect(),
        total_urls,
        successful: resources.completed_urls.load(Ordering::SeqCst),
        failed: resources.failed_urls.load(Ordering::SeqCst),
        elapsed_seconds: resources.start_time.elapsed().as_secs_f64(),
    };

    print_error_statistics(&error_stats);
    print_run_summary(run.total_urls, run.successful, run.failed, run.elapsed_seconds);
    Ok(run)
}
