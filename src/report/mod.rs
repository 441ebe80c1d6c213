//! SEO reports.
//!
//! This module provides:
//! - [`Report`]: the merged result of one analysis run
//! - [`ReportAggregator`]: runs every analyzer on one page and builds the report
//! - [`PageMetrics`]: headline counts kept at the top level of the report

mod aggregator;
mod metrics;

use serde::Serialize;

use crate::analyzers::{
    AnalyzerKind, AnalyzerSlot, CompetitiveAnalysis, ContentAnalysis, KeywordAnalysis,
    MetaAnalysis, MobileAnalysis, TechnicalAnalysis,
};
use crate::collaborators::{GeneratedDescription, PerformanceResult};

pub use aggregator::{AnalyzerSet, ReportAggregator};
pub use metrics::PageMetrics;

/// Number of recommendations quoted in [`Report::summary`].
const SUMMARY_RECOMMENDATIONS: usize = 5;

/// SEO report for one page.
///
/// Every analyzer has a slot, filled with its result or with the error that
/// replaced it. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub url: String,
    pub meta_analysis: AnalyzerSlot<MetaAnalysis>,
    pub content_analysis: AnalyzerSlot<ContentAnalysis>,
    pub technical_analysis: AnalyzerSlot<TechnicalAnalysis>,
    pub mobile_analysis: AnalyzerSlot<MobileAnalysis>,
    pub keyword_analysis: AnalyzerSlot<KeywordAnalysis>,
    pub competitive_analysis: AnalyzerSlot<CompetitiveAnalysis>,
    pub page_metrics: PageMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_description: Option<GeneratedDescription>,
    /// Analyzer recommendations in analyzer order, then performance lines.
    pub recommendations: Vec<String>,
    pub overall_score: u8,
}

impl Report {
    /// Score of every analyzer, `None` for failed ones, in analyzer order.
    pub fn scores(&self) -> Vec<(AnalyzerKind, Option<u8>)> {
        vec![
            (AnalyzerKind::Meta, self.meta_analysis.score()),
            (AnalyzerKind::Content, self.content_analysis.score()),
            (AnalyzerKind::Technical, self.technical_analysis.score()),
            (AnalyzerKind::Mobile, self.mobile_analysis.score()),
            (AnalyzerKind::Keyword, self.keyword_analysis.score()),
            (AnalyzerKind::Competitive, self.competitive_analysis.score()),
        ]
    }

    /// Analyzers whose slot holds an error.
    pub fn failed_analyzers(&self) -> Vec<AnalyzerKind> {
        self.scores()
            .into_iter()
            .filter(|(_, score)| score.is_none())
            .map(|(kind, _)| kind)
            .collect()
    }

    /// `true` when at least one analyzer failed.
    pub fn is_degraded(&self) -> bool {
        !self.failed_analyzers().is_empty()
    }

    /// Keeps only the first `max` recommendations.
    pub fn truncate_recommendations(&mut self, max: usize) {
        self.recommendations.truncate(max);
    }

    /// One-paragraph digest of the report.
    pub fn summary(&self) -> String {
        let metrics = &self.page_metrics;
        let mut summary = format!(
            "SEO analysis of '{}' ({}): overall score {}/100. H1 headings: {}. H2 headings: {}. \
             Internal links: {}, external links: {}. Images without alt: {}.",
            metrics.title.as_deref().unwrap_or("untitled page"),
            self.url,
            self.overall_score,
            metrics.h1_tags.len(),
            metrics.h2_tags.len(),
            metrics.internal_links,
            metrics.external_links,
            metrics.img_without_alt,
        );
        if let Some(score) = self.performance.as_ref().and_then(PerformanceResult::score) {
            summary.push_str(&format!(" Performance score: {}.", score));
        }
        if !self.recommendations.is_empty() {
            let top: Vec<&str> = self
                .recommendations
                .iter()
                .take(SUMMARY_RECOMMENDATIONS)
                .map(String::as_str)
                .collect();
            summary.push_str(&format!(" Top recommendations: {}", top.join(" ")));
        }
        summary
    }
}
