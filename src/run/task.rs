//! Per-URL task processing.
//!
//! This module contains the logic for analyzing a single page, including
//! success/failure/timeout handling.

use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::app::{log_progress, record_report_statistics};
use crate::collaborators::DEFAULT_CACHE_TTL;
use crate::config::LOGGING_INTERVAL;
use crate::error_handling::{update_error_stats, ErrorType, InfoType};
use crate::fetch::{fetch_page, read_local_html, FetchedPage};
use crate::report::Report;

use super::resources::{AnalysisContext, UrlTaskParams};

/// Analyzes one page under the run's timeout.
///
/// Spawned as a Tokio task per URL. Returns the input index with the report,
/// or `None` when the page failed or timed out.
pub async fn process_url_task(params: UrlTaskParams) -> Option<(usize, Report)> {
    let UrlTaskParams {
        index,
        url,
        ctx,
        permit: _permit, // Hold permit until task completes
        processing_timeout,
        completed_urls,
        failed_urls,
        total_urls,
        start_time,
    } = params;

    let outcome = match tokio::time::timeout(processing_timeout, analyze_url(&ctx, &url)).await {
        Ok(Ok(report)) => {
            completed_urls.fetch_add(1, Ordering::SeqCst);
            Some((index, report))
        }
        Ok(Err(e)) => {
            failed_urls.fetch_add(1, Ordering::SeqCst);
            warn!("Failed to analyze {}: {:#}", url, e);
            None
        }
        Err(_) => {
            failed_urls.fetch_add(1, Ordering::SeqCst);
            ctx.error_stats.increment_error(ErrorType::ProcessUrlTimeout);
            warn!(
                "Timed out analyzing {} after {}s",
                url,
                processing_timeout.as_secs()
            );
            None
        }
    };

    let done = completed_urls.load(Ordering::SeqCst) + failed_urls.load(Ordering::SeqCst);
    if done % LOGGING_INTERVAL == 0 {
        log_progress(start_time, &completed_urls, total_urls);
    }
    outcome
}

/// Obtains the page's HTML and builds its report.
///
/// Served from the cache when the same URL was analyzed earlier in the run.
async fn analyze_url(ctx: &AnalysisContext, url: &str) -> Result<Report> {
    if let Some(report) = ctx.cache.get(url) {
        ctx.error_stats.increment_info(InfoType::CacheHit);
        debug!("Reusing report for {}", url);
        return Ok(report);
    }

    let page = match obtain_page(ctx, url).await {
        Ok(page) => page,
        Err(e) => {
            update_error_stats(&ctx.error_stats, &e);
            return Err(e).with_context(|| format!("Could not get HTML for {url}"));
        }
    };

    if page.was_redirected() {
        ctx.error_stats.increment_info(InfoType::HttpRedirect);
        if page.is_https_upgrade() {
            ctx.error_stats.increment_info(InfoType::HttpsRedirect);
        }
        debug!("{} redirected to {}", page.requested_url, page.final_url);
    }

    // Parsing and scoring are CPU-bound
    let aggregator = ctx.aggregator.clone();
    let report = tokio::task::spawn_blocking(move || aggregator.analyze(&page.final_url, &page.html))
        .await
        .map_err(|e| {
            ctx.error_stats.increment_error(ErrorType::AnalyzerFailure);
            anyhow::anyhow!("Analysis task failed: {e}")
        })?;

    record_report_statistics(&ctx.error_stats, &report);
    ctx.cache.set(url, &report, DEFAULT_CACHE_TTL);
    Ok(report)
}

async fn obtain_page(
    ctx: &AnalysisContext,
    url: &str,
) -> Result<FetchedPage, crate::error_handling::FetchError> {
    match &ctx.local_html {
        Some(path) => {
            let html = read_local_html(path).await?;
            ctx.error_stats.increment_info(InfoType::LocalFile);
            Ok(FetchedPage {
                requested_url: url.to_string(),
                final_url: url.to_string(),
                html,
            })
        }
        None => fetch_page(&ctx.client, url).await,
    }
}
