//! Run statistics: recording per-report signals and printing the totals.

use log::info;
use strum::IntoEnumIterator;

use crate::analyzers::DescriptionSource;
use crate::error_handling::{ErrorType, InfoType, ProcessingStats, WarningType};
use crate::report::Report;

/// Counts the missing signals and analyzer failures of one finished report.
pub fn record_report_statistics(stats: &ProcessingStats, report: &Report) {
    let metrics = &report.page_metrics;
    if metrics.title.is_none() {
        stats.increment_warning(WarningType::MissingTitle);
    }
    if metrics.h1_tags.is_empty() {
        stats.increment_warning(WarningType::MissingH1);
    }
    if metrics.img_without_alt > 0 {
        stats.increment_warning(WarningType::ImagesWithoutAlt);
    }
    if let Some(meta) = report.meta_analysis.completed() {
        if meta.description.source != Some(DescriptionSource::MetaTag) {
            stats.increment_warning(WarningType::MissingMetaDescription);
        }
    }
    if let Some(mobile) = report.mobile_analysis.completed() {
        if !mobile.viewport.has_viewport {
            stats.increment_warning(WarningType::MissingViewport);
        }
    }

    let failed = report.failed_analyzers();
    if !failed.is_empty() {
        stats.increment_warning(WarningType::DegradedReport);
        for _ in &failed {
            stats.increment_error(ErrorType::AnalyzerFailure);
        }
    }
}

/// Prints a one-line summary of the run.
pub fn print_run_summary(total_urls: usize, successful: usize, failed: usize, elapsed: f64) {
    info!(
        "✅ Analyzed {} URL{} ({} succeeded, {} failed) in {:.1}s",
        total_urls,
        if total_urls == 1 { "" } else { "s" },
        successful,
        failed,
        elapsed
    );
}

/// Prints error, warning, and info statistics to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    let total_warnings = error_stats.total_warnings();
    let total_info = error_stats.total_info();

    if total_errors > 0 {
        info!("Error Counts ({} total):", total_errors);
        for error_type in ErrorType::iter() {
            let count = error_stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    if total_warnings > 0 {
        info!("Warning Counts ({} total):", total_warnings);
        for warning_type in WarningType::iter() {
            let count = error_stats.get_warning_count(warning_type);
            if count > 0 {
                info!("   {}: {}", warning_type.as_str(), count);
            }
        }
    }

    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = error_stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportAggregator;

    #[test]
    fn test_record_bare_page() {
        let stats = ProcessingStats::new();
        let report = ReportAggregator::new()
            .analyze("https://example.com/", r#"<p>hi</p><img src="a.png">"#);
        record_report_statistics(&stats, &report);

        assert_eq!(stats.get_warning_count(WarningType::MissingTitle), 1);
        assert_eq!(stats.get_warning_count(WarningType::MissingH1), 1);
        assert_eq!(stats.get_warning_count(WarningType::ImagesWithoutAlt), 1);
        assert_eq!(stats.get_warning_count(WarningType::MissingMetaDescription), 1);
        assert_eq!(stats.get_warning_count(WarningType::MissingViewport), 1);
        assert_eq!(stats.get_warning_count(WarningType::DegradedReport), 0);
        assert_eq!(stats.total_errors(), 0);
    }

    #[test]
    fn test_record_complete_page() {
        let stats = ProcessingStats::new();
        let html = r#"<html><head><title>Fresh sourdough bread daily</title>
            <meta name="description" content="Fresh sourdough baked every morning.">
            <meta name="viewport" content="width=device-width, initial-scale=1"></head>
            <body><h1>Bakery</h1><img src="a.png" alt="Loaf"></body></html>"#;
        let report = ReportAggregator::new().analyze("https://example.com/", html);
        record_report_statistics(&stats, &report);
        assert_eq!(stats.total_warnings(), 0);
    }

    #[test]
    fn test_record_degraded_report() {
        let stats = ProcessingStats::new();
        let report =
            ReportAggregator::new().analyze("not a url", "<title>Plain page title</title>");
        record_report_statistics(&stats, &report);
        assert_eq!(stats.get_warning_count(WarningType::DegradedReport), 1);
        assert_eq!(stats.get_error_count(ErrorType::AnalyzerFailure), 1);
    }

    #[test]
    fn test_print_error_statistics_all_types() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::HttpRequestTimeoutError);
        stats.increment_warning(WarningType::MissingMetaDescription);
        stats.increment_info(InfoType::CacheHit);
        print_error_statistics(&stats);
        print_run_summary(3, 2, 1, 0.5);
    }
}
