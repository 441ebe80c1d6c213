//! Tests for command-line parsing and configuration validation.

use clap::Parser;
use seo_analyzer::config::{DEFAULT_MAX_CONCURRENCY, DEFAULT_USER_AGENT};
use seo_analyzer::{Config, LogFormat, LogLevel, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_parse_urls_with_defaults() {
    let config =
        Config::try_parse_from(["seo_analyzer", "example.com", "https://example.org/"])
            .expect("parses");
    assert_eq!(config.urls, vec!["example.com", "https://example.org/"]);
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.max_concurrency, DEFAULT_MAX_CONCURRENCY);
    assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    assert!(matches!(config.log_level, LogLevel::Info));
    assert!(matches!(config.log_format, LogFormat::Plain));
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_file_input() {
    let config = Config::try_parse_from([
        "seo_analyzer",
        "--file",
        "urls.txt",
        "--format",
        "text",
        "--max-recommendations",
        "10",
    ])
    .expect("parses");
    assert!(config.urls.is_empty());
    assert_eq!(config.file, Some(PathBuf::from("urls.txt")));
    assert_eq!(config.format, OutputFormat::Text);
    assert_eq!(config.max_recommendations, 10);
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_rejects_bad_values() {
    assert!(Config::try_parse_from(["seo_analyzer", "a.com", "--max-concurrency", "many"]).is_err());
    assert!(Config::try_parse_from(["seo_analyzer", "a.com", "--log-level", "loud"]).is_err());
    assert!(Config::try_parse_from(["seo_analyzer", "a.com", "--unknown-flag"]).is_err());
}

#[test]
fn test_validation_errors_name_the_option() {
    let no_input = Config::try_parse_from(["seo_analyzer"]).expect("parses");
    let err = no_input.validate().expect_err("no URLs");
    assert_eq!(err.field, "urls");

    let zero = Config::try_parse_from(["seo_analyzer", "a.com", "--max-concurrency", "0"])
        .expect("parses");
    let err = zero.validate().expect_err("zero concurrency");
    assert_eq!(err.field, "max-concurrency");
    assert!(err.to_string().contains("max-concurrency"));

    let html_two_urls =
        Config::try_parse_from(["seo_analyzer", "a.com", "b.com", "--html", "page.html"])
            .expect("parses");
    assert_eq!(html_two_urls.validate().expect_err("two URLs").field, "html");
}

#[test]
fn test_extreme_values_do_not_panic() {
    let config = Config {
        urls: vec!["a.com".into()],
        max_concurrency: usize::MAX,
        timeout_seconds: u64::MAX,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}
