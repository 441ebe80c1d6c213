//! Run initialization: input URLs and shared resources.

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::validate_and_normalize_url;
use crate::collaborators::InMemoryReportCache;
use crate::config::{Config, URL_PROCESSING_TIMEOUT};
use crate::error_handling::{ErrorType, InitializationError, ProcessingStats};
use crate::initialization::{init_client, init_semaphore};
use crate::report::ReportAggregator;

use super::resources::{AnalysisContext, RunResources};

/// Collects the URLs to analyze, command-line URLs first, then the `--file` lines.
///
/// Blank lines and `#` comments in the file are skipped. Invalid URLs are
/// logged, counted as [`ErrorType::InvalidUrl`] and dropped.
///
/// # Errors
///
/// Returns an error if the URL file cannot be opened or read.
pub async fn load_urls(config: &Config, error_stats: &ProcessingStats) -> Result<Vec<String>> {
    let mut raw = config.urls.clone();

    if let Some(path) = &config.file {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        let mut lines = BufReader::new(file).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read input file")?
        {
            let trimmed = line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                raw.push(trimmed.to_string());
            }
        }
    }

    let mut urls = Vec::with_capacity(raw.len());
    for candidate in &raw {
        match validate_and_normalize_url(candidate) {
            Some(url) => urls.push(url),
            None => error_stats.increment_error(ErrorType::InvalidUrl),
        }
    }

    let skipped = raw.len() - urls.len();
    if skipped > 0 {
        warn!("Skipped {} invalid URL(s)", skipped);
    }
    info!("Total URLs to analyze: {}", urls.len());
    Ok(urls)
}

/// Per-URL timeout: the fixed minimum, or twice the request timeout when longer.
pub fn processing_timeout(config: &Config) -> Duration {
    URL_PROCESSING_TIMEOUT.max(Duration::from_secs(config.timeout_seconds.saturating_mul(2)))
}

/// Initializes the HTTP client, cache, semaphore and counters for a run.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn init_run_resources(
    config: &Config,
    aggregator: ReportAggregator,
    error_stats: Arc<ProcessingStats>,
) -> Result<RunResources> {
    let client = init_client(config)
        .map_err(InitializationError::from)
        .context("Failed to initialize HTTP client")?;

    let ctx = Arc::new(AnalysisContext {
        client,
        aggregator,
        cache: Arc::new(InMemoryReportCache::new()),
        error_stats,
        local_html: config.html.clone(),
    });

    Ok(RunResources {
        ctx,
        semaphore: init_semaphore(config.max_concurrency),
        processing_timeout: processing_timeout(config),
        completed_urls: Arc::new(AtomicUsize::new(0)),
        failed_urls: Arc::new(AtomicUsize::new(0)),
        start_time: Instant::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_urls_from_args_and_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "# shop pages\n\nexample.org/pricing\nnot a url!!!\n  https://example.net  ")
            .expect("write");

        let config = Config {
            urls: vec!["example.com".into()],
            file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let stats = ProcessingStats::new();
        let urls = load_urls(&config, &stats).await.expect("loads");

        assert_eq!(
            urls,
            vec![
                "https://example.com/",
                "https://example.org/pricing",
                "https://example.net/"
            ]
        );
        assert_eq!(stats.get_error_count(ErrorType::InvalidUrl), 1);
    }

    #[tokio::test]
    async fn test_load_urls_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = Config {
            file: Some(dir.path().join("missing.txt")),
            ..Default::default()
        };
        let err = load_urls(&config, &ProcessingStats::new())
            .await
            .expect_err("missing file");
        assert!(err.to_string().starts_with("Failed to open input file"));
    }

    #[test]
    fn test_processing_timeout() {
        assert_eq!(processing_timeout(&Config::default()), URL_PROCESSING_TIMEOUT);
        let config = Config {
            timeout_seconds: 60,
            ..Default::default()
        };
        assert_eq!(processing_timeout(&config), Duration::from_secs(120));
    }
}
