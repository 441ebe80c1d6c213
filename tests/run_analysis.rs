//! End-to-end runs that read HTML from disk, so no network is needed.

mod helpers;

use std::io::Write;

use helpers::{SCENARIO_PAGE, WELL_FORMED_PAGE};
use seo_analyzer::{render_reports, run_analysis, Config, OutputFormat};
use tempfile::NamedTempFile;

fn saved_page(html: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(html.as_bytes()).expect("write");
    file
}

#[tokio::test]
async fn test_run_with_local_html() {
    let page = saved_page(WELL_FORMED_PAGE);
    let config = Config {
        urls: vec!["bakery.example".into()],
        html: Some(page.path().to_path_buf()),
        ..Default::default()
    };

    let run = run_analysis(config).await.expect("run succeeds");
    assert_eq!(run.total_urls, 1);
    assert_eq!(run.successful, 1);
    assert_eq!(run.failed, 0);

    let report = &run.reports[0];
    assert_eq!(report.url, "https://bakery.example/");
    assert_eq!(report.page_metrics.h1_tags, vec!["Sourdough bread"]);
    assert!(!report.is_degraded());
}

#[tokio::test]
async fn test_run_output_matches_direct_analysis() {
    let page = saved_page(SCENARIO_PAGE);
    let config = Config {
        urls: vec!["https://shop.example/".into()],
        html: Some(page.path().to_path_buf()),
        ..Default::default()
    };

    let run = run_analysis(config).await.expect("run succeeds");
    let direct = seo_analyzer::analyze("https://shop.example/", SCENARIO_PAGE);
    assert_eq!(run.reports, vec![direct.clone()]);

    let rendered = render_reports(&run.reports, OutputFormat::Json, 0).expect("renders");
    assert_eq!(
        rendered,
        serde_json::to_string_pretty(&direct).expect("serializable")
    );
}

#[tokio::test]
async fn test_run_missing_html_file_counts_failure() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = Config {
        urls: vec!["https://shop.example/".into()],
        html: Some(dir.path().join("missing.html")),
        ..Default::default()
    };

    let run = run_analysis(config).await.expect("run completes");
    assert_eq!(run.successful, 0);
    assert_eq!(run.failed, 1);
    assert!(run.reports.is_empty());
}

#[tokio::test]
async fn test_run_rejects_when_no_valid_urls() {
    let config = Config {
        urls: vec!["not a valid url!!!".into()],
        ..Default::default()
    };
    let err = run_analysis(config).await.expect_err("nothing to analyze");
    assert_eq!(err.to_string(), "No valid URLs to analyze");
}

#[tokio::test]
async fn test_run_rejects_invalid_config() {
    let config = Config {
        urls: vec!["https://shop.example/".into()],
        max_concurrency: 0,
        ..Default::default()
    };
    let err = run_analysis(config).await.expect_err("invalid config");
    assert_eq!(err.to_string(), "Configuration validation failed");
    assert!(format!("{err:#}").contains("max-concurrency"));
}
