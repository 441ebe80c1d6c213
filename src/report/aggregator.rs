//! Runs the analyzers and merges their results.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use super::{PageMetrics, Report};
use crate::analyzers::{
    Analyzer, AnalyzerKind, AnalyzerSlot, CompetitiveAnalysis, CompetitiveAnalyzer,
    ContentAnalysis, ContentAnalyzer, KeywordAnalysis, KeywordAnalyzer, MetaAnalysis,
    MetaAnalyzer, MobileAnalysis, MobileAnalyzer, Page, TechnicalAnalysis, TechnicalAnalyzer,
};
use crate::collaborators::{
    description_source_text, DescriptionGenerator, GeneratedDescription, PerformanceProvider,
    PerformanceResult, ReportCache, DEFAULT_CACHE_TTL,
};
use crate::document::Document;
use crate::error_handling::AnalyzerError;
use crate::utils::text::clamp_score;

type SharedAnalyzer<T> = Arc<dyn Analyzer<Output = T> + Send + Sync>;

/// The analyzer filling each report slot.
///
/// Defaults to the built-in analyzers.
#[derive(Clone)]
pub struct AnalyzerSet {
    pub meta: SharedAnalyzer<MetaAnalysis>,
    pub content: SharedAnalyzer<ContentAnalysis>,
    pub technical: SharedAnalyzer<TechnicalAnalysis>,
    pub mobile: SharedAnalyzer<MobileAnalysis>,
    pub keyword: SharedAnalyzer<KeywordAnalysis>,
    pub competitive: SharedAnalyzer<CompetitiveAnalysis>,
}

impl Default for AnalyzerSet {
    fn default() -> Self {
        Self {
            meta: Arc::new(MetaAnalyzer),
            content: Arc::new(ContentAnalyzer),
            technical: Arc::new(TechnicalAnalyzer),
            mobile: Arc::new(MobileAnalyzer),
            keyword: Arc::new(KeywordAnalyzer),
            competitive: Arc::new(CompetitiveAnalyzer),
        }
    }
}

/// Builds [`Report`]s.
///
/// Holds the analyzers and the optional collaborators. Cloning is cheap and
/// clones share both.
#[derive(Clone, Default)]
pub struct ReportAggregator {
    analyzers: AnalyzerSet,
    performance: Option<Arc<dyn PerformanceProvider>>,
    describer: Option<Arc<dyn DescriptionGenerator>>,
}

impl std::fmt::Debug for ReportAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportAggregator")
            .field("performance", &self.performance.is_some())
            .field("describer", &self.describer.is_some())
            .finish()
    }
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the analyzers that fill the report slots.
    pub fn with_analyzers(mut self, analyzers: AnalyzerSet) -> Self {
        self.analyzers = analyzers;
        self
    }

    pub fn with_performance_provider(mut self, provider: Arc<dyn PerformanceProvider>) -> Self {
        self.performance = Some(provider);
        self
    }

    pub fn with_description_generator(mut self, generator: Arc<dyn DescriptionGenerator>) -> Self {
        self.describer = Some(generator);
        self
    }

    /// Analyzes one page.
    ///
    /// Never fails: an analyzer that errors or panics leaves an error in its
    /// slot and drops out of the overall score.
    pub fn analyze(&self, url: &str, html: &str) -> Report {
        let document = Document::parse(html);
        let page = Page::new(url, &document);

        let analyzers = &self.analyzers;
        let meta_analysis = run_isolated(analyzers.meta.as_ref(), &page);
        let content_analysis = run_isolated(analyzers.content.as_ref(), &page);
        let technical_analysis = run_isolated(analyzers.technical.as_ref(), &page);
        let mobile_analysis = run_isolated(analyzers.mobile.as_ref(), &page);
        let keyword_analysis = run_isolated(analyzers.keyword.as_ref(), &page);
        let competitive_analysis = run_isolated(analyzers.competitive.as_ref(), &page);

        let performance = self
            .performance
            .as_ref()
            .map(|provider| fetch_performance(provider.as_ref(), url));
        let generated_description = self
            .describer
            .as_ref()
            .and_then(|describer| describe(describer.as_ref(), &document));

        let mut recommendations = Vec::new();
        recommendations.extend_from_slice(meta_analysis.recommendations());
        recommendations.extend_from_slice(content_analysis.recommendations());
        recommendations.extend_from_slice(technical_analysis.recommendations());
        recommendations.extend_from_slice(mobile_analysis.recommendations());
        recommendations.extend_from_slice(keyword_analysis.recommendations());
        recommendations.extend_from_slice(competitive_analysis.recommendations());
        if let Some(performance) = &performance {
            recommendations.extend(performance.report_lines());
        }

        let mut report = Report {
            url: url.to_string(),
            meta_analysis,
            content_analysis,
            technical_analysis,
            mobile_analysis,
            keyword_analysis,
            competitive_analysis,
            page_metrics: PageMetrics::collect(&document),
            performance,
            generated_description,
            recommendations,
            overall_score: 0,
        };
        report.overall_score = overall_score(&report.scores());

        log::debug!(
            "Analyzed {}: overall score {}, {} recommendations",
            url,
            report.overall_score,
            report.recommendations.len()
        );
        report
    }

    /// Returns the cached report for `url`, or analyzes `html` and caches the
    /// result for [`DEFAULT_CACHE_TTL`].
    pub fn analyze_cached(&self, cache: &dyn ReportCache, url: &str, html: &str) -> Report {
        self.analyze_cached_with_ttl(cache, url, html, DEFAULT_CACHE_TTL)
    }

    pub fn analyze_cached_with_ttl(
        &self,
        cache: &dyn ReportCache,
        url: &str,
        html: &str,
        ttl: Duration,
    ) -> Report {
        if let Some(report) = cache.get(url) {
            log::debug!("Cache hit for {}", url);
            return report;
        }
        let report = self.analyze(url, html);
        cache.set(url, &report, ttl);
        report
    }
}

/// Runs one analyzer, turning an error or a panic into a failed slot.
fn run_isolated<A: Analyzer + ?Sized>(
    analyzer: &A,
    page: &Page<'_>,
) -> AnalyzerSlot<A::Output> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| analyzer.analyze(page)))
        .unwrap_or_else(|payload| Err(AnalyzerError::Panicked(panic_message(payload.as_ref()))));

    match outcome {
        Ok(output) => AnalyzerSlot::Completed(output),
        Err(e) => {
            log::warn!("{} failed for {}: {}", analyzer.kind(), page.url, e);
            AnalyzerSlot::failed(&e)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn fetch_performance(provider: &dyn PerformanceProvider, url: &str) -> PerformanceResult {
    panic::catch_unwind(AssertUnwindSafe(|| provider.performance(url))).unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        log::warn!("Performance provider panicked for {}: {}", url, message);
        PerformanceResult::Failed {
            error: format!("Performance data unavailable: {}", message),
        }
    })
}

fn describe(
    describer: &dyn DescriptionGenerator,
    document: &Document,
) -> Option<GeneratedDescription> {
    let text = description_source_text(document);
    if text.trim().is_empty() {
        return None;
    }
    let generated = panic::catch_unwind(AssertUnwindSafe(|| describer.generate(&text)))
        .unwrap_or_else(|payload| {
            log::warn!("Description generator panicked: {}", panic_message(payload.as_ref()));
            None
        })?;
    // Re-clamp: implementors may build the struct directly.
    Some(GeneratedDescription::new(generated.description, generated.confidence))
}

/// Weighted mean of the successful analyzers' scores, normalized over their
/// weights. Zero when no weighted analyzer succeeded.
fn overall_score(scores: &[(AnalyzerKind, Option<u8>)]) -> u8 {
    let (weighted_sum, total_weight) = scores
        .iter()
        .filter_map(|(kind, score)| score.map(|score| (kind.weight(), score)))
        .fold((0.0, 0u32), |(sum, total), (weight, score)| {
            (sum + f64::from(weight) * f64::from(score), total + weight)
        });

    if total_weight == 0 {
        0
    } else {
        clamp_score(weighted_sum / f64::from(total_weight))
    }
}
