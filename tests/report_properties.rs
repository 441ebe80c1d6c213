//! Properties every report must satisfy, checked through the public API.

mod helpers;

use std::marker::PhantomData;
use std::sync::Arc;

use helpers::{stuffed_page, SCENARIO_PAGE, WELL_FORMED_PAGE};
use serde::Serialize;
use seo_analyzer::analyzers::{
    Analyzer, AnalyzerKind, AnalyzerOutput, ContentAnalyzer, KeywordDistribution, MetaAnalyzer,
    Page, ScriptOptimization,
};
use seo_analyzer::document::Document;
use seo_analyzer::{analyze, AnalyzerError, AnalyzerSet, Report, ReportAggregator};

const URL: &str = "https://bakery.example/";

fn all_scores_in_range(report: &Report) {
    assert!(report.overall_score <= 100);
    for (kind, score) in report.scores() {
        if let Some(score) = score {
            assert!(score <= 100, "{} scored {}", kind, score);
        }
    }
}

#[test]
fn test_scores_in_range_for_varied_pages() {
    let stuffed = stuffed_page();
    let pages = [
        "",
        "<p>",
        "plain text, no markup at all",
        SCENARIO_PAGE,
        WELL_FORMED_PAGE,
        stuffed.as_str(),
        "<html><head><meta name=viewport content='user-scalable=no'></head></html>",
    ];
    for html in pages {
        all_scores_in_range(&analyze(URL, html));
    }
}

#[test]
fn test_report_json_is_deterministic() {
    let first = serde_json::to_string(&analyze(URL, WELL_FORMED_PAGE)).expect("serializable");
    let second = serde_json::to_string(&analyze(URL, WELL_FORMED_PAGE)).expect("serializable");
    assert_eq!(first, second);
}

#[test]
fn test_analyzer_rerun_on_same_document_is_identical() {
    let doc = Document::parse(WELL_FORMED_PAGE);
    let page = Page::new(URL, &doc);
    assert_eq!(
        MetaAnalyzer.analyze(&page).expect("meta"),
        MetaAnalyzer.analyze(&page).expect("meta")
    );
    assert_eq!(
        ContentAnalyzer.analyze(&page).expect("content"),
        ContentAnalyzer.analyze(&page).expect("content")
    );
}

#[test]
fn test_report_json_key_order() {
    let json = serde_json::to_string(&analyze(URL, WELL_FORMED_PAGE)).expect("serializable");
    let keys = [
        "\"url\"",
        "\"meta_analysis\"",
        "\"content_analysis\"",
        "\"technical_analysis\"",
        "\"mobile_analysis\"",
        "\"keyword_analysis\"",
        "\"competitive_analysis\"",
        "\"page_metrics\"",
        "\"recommendations\"",
        "\"overall_score\"",
    ];
    let positions: Vec<usize> = keys
        .iter()
        .map(|key| json.find(key).unwrap_or_else(|| panic!("missing {key}")))
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    // No collaborators attached
    assert!(!json.contains("\"performance\""));
    assert!(!json.contains("\"generated_description\""));
}

#[test]
fn test_title_length_recommendations() {
    let good = analyze(URL, "<title>Fresh sourdough bread</title>");
    assert!(!good
        .recommendations
        .iter()
        .any(|r| r.starts_with("Title is too")));

    let short = analyze(URL, "<title>Bread</title>");
    assert!(short
        .recommendations
        .iter()
        .any(|r| r.starts_with("Title is too short")));
}

#[test]
fn test_no_images_means_no_alt_recommendation() {
    let report = analyze(URL, "<h1>Bread</h1><p>No pictures here.</p>");
    assert_eq!(report.page_metrics.img_without_alt, 0);
    assert!(!report
        .recommendations
        .iter()
        .any(|r| r.contains("without alt text")));
}

#[test]
fn test_responsive_viewport_adds_thirty() {
    let body = "<body><p>Mobile page</p></body>";
    let with_viewport = analyze(
        URL,
        &format!(
            r#"<head><meta name="viewport" content="width=device-width, initial-scale=1"></head>{body}"#
        ),
    );
    let without_viewport = analyze(URL, body);

    let mobile = with_viewport
        .mobile_analysis
        .completed()
        .expect("mobile analysis completed");
    assert!(mobile.viewport.is_responsive);
    assert!(mobile.mobile_score >= 30);

    let bare = without_viewport
        .mobile_analysis
        .completed()
        .expect("mobile analysis completed");
    assert_eq!(mobile.mobile_score - bare.mobile_score, 30);
}

#[test]
fn test_scenario_page() {
    let report = analyze(URL, SCENARIO_PAGE);
    let has = |prefix: &str| report.recommendations.iter().any(|r| r.starts_with(prefix));

    assert!(has("Title is too short"));
    assert!(has("Missing meta description"));
    assert!(has("Missing H1"));
    assert!(report
        .recommendations
        .contains(&"1 image without alt text. Add descriptive alt attributes.".to_string()));
    assert_eq!(report.page_metrics.internal_links, 1);
    assert_eq!(report.page_metrics.external_links, 1);
    assert_eq!(report.page_metrics.img_without_alt, 1);
}

#[test]
fn test_duplicate_paragraphs_scenario() {
    let paragraph = "Handmade oak tables for sale."; // 29 chars
    let report = analyze(URL, &format!("<p>{paragraph}</p><p>{paragraph}</p>"));
    let content = report.content_analysis.completed().expect("content completed");
    assert!(content.duplicate_content.has_duplicates);
    assert_eq!(content.duplicate_content.duplicate_count, 1);
}

#[test]
fn test_keyword_stuffing_scenario() {
    let report = analyze(URL, &stuffed_page());
    let keywords = report.keyword_analysis.completed().expect("keyword completed");

    assert!(keywords.density.has_keyword_stuffing);
    assert_eq!(keywords.placement.title.keywords, vec!["widgets"]);
    assert_eq!(keywords.placement.h1.keywords, vec!["widgets"]);
    assert!(keywords.placement.placement_score >= 10);
}

#[test]
fn test_well_formed_page_beats_scenario_page() {
    let good = analyze(URL, WELL_FORMED_PAGE);
    let bad = analyze(URL, SCENARIO_PAGE);

    assert!(!good.is_degraded());
    assert_eq!(good.page_metrics.img_without_alt, 0);
    assert_eq!(good.page_metrics.h1_tags, vec!["Sourdough bread"]);
    assert!(!good.recommendations.iter().any(|r| r.starts_with("Missing H1")));
    assert!(good.overall_score > bad.overall_score);
}

#[test]
fn test_invalid_url_degrades_only_technical() {
    let report = analyze("not a url", WELL_FORMED_PAGE);
    assert!(report.is_degraded());
    assert_eq!(report.failed_analyzers().len(), 1);
    assert!(report.technical_analysis.completed().is_none());
    assert!(report.meta_analysis.completed().is_some());
    all_scores_in_range(&report);
}

/// Always returns an error for its slot.
struct Broken<T>(AnalyzerKind, PhantomData<fn() -> T>);

impl<T: AnalyzerOutput + Serialize> Analyzer for Broken<T> {
    type Output = T;

    fn kind(&self) -> AnalyzerKind {
        self.0
    }

    fn analyze(&self, page: &Page<'_>) -> Result<T, AnalyzerError> {
        Err(AnalyzerError::InvalidUrl {
            url: page.url.to_string(),
            reason: "rejected".to_string(),
        })
    }
}

/// Panics instead of returning.
struct Crashing<T>(AnalyzerKind, PhantomData<fn() -> T>);

impl<T: AnalyzerOutput + Serialize> Analyzer for Crashing<T> {
    type Output = T;

    fn kind(&self) -> AnalyzerKind {
        self.0
    }

    fn analyze(&self, _page: &Page<'_>) -> Result<T, AnalyzerError> {
        panic!("{} crashed", self.0);
    }
}

type SharedAnalyzer<T> = Arc<dyn Analyzer<Output = T> + Send + Sync>;

fn broken<T: AnalyzerOutput + Serialize + 'static>(kind: AnalyzerKind) -> SharedAnalyzer<T> {
    Arc::new(Broken(kind, PhantomData))
}

fn crashing<T: AnalyzerOutput + Serialize + 'static>(kind: AnalyzerKind) -> SharedAnalyzer<T> {
    Arc::new(Crashing(kind, PhantomData))
}

#[test]
fn test_every_analyzer_failing_still_yields_report() {
    let analyzers = AnalyzerSet {
        meta: broken(AnalyzerKind::Meta),
        content: crashing(AnalyzerKind::Content),
        technical: broken(AnalyzerKind::Technical),
        mobile: crashing(AnalyzerKind::Mobile),
        keyword: broken(AnalyzerKind::Keyword),
        competitive: crashing(AnalyzerKind::Competitive),
    };
    let report = ReportAggregator::new()
        .with_analyzers(analyzers)
        .analyze(URL, WELL_FORMED_PAGE);

    assert_eq!(report.overall_score, 0);
    assert!(report.recommendations.is_empty());
    assert_eq!(report.failed_analyzers().len(), 6);
    // Page metrics do not depend on the analyzers
    assert_eq!(report.page_metrics.h1_tags, vec!["Sourdough bread"]);

    let json = serde_json::to_value(&report).expect("serializable");
    for kind in report.failed_analyzers() {
        let slot = json[kind.as_str()].as_object().expect("slot is an object");
        assert_eq!(slot.len(), 1, "{} holds only an error", kind);
        assert!(slot["error"].is_string());
    }
    assert_eq!(
        json["content_analysis"]["error"],
        "Analyzer panicked: content_analysis crashed"
    );
    assert_eq!(
        json["meta_analysis"]["error"],
        "Invalid page URL 'https://bakery.example/': rejected"
    );
    assert_eq!(json["overall_score"], 0);
    assert_eq!(json["recommendations"], serde_json::json!([]));
}

#[test]
fn test_unweighted_analyzers_do_not_move_overall_score() {
    let baseline = analyze(URL, WELL_FORMED_PAGE);
    let analyzers = AnalyzerSet {
        keyword: broken(AnalyzerKind::Keyword),
        competitive: crashing(AnalyzerKind::Competitive),
        ..AnalyzerSet::default()
    };
    let report = ReportAggregator::new()
        .with_analyzers(analyzers)
        .analyze(URL, WELL_FORMED_PAGE);

    assert_eq!(
        report.failed_analyzers(),
        vec![AnalyzerKind::Keyword, AnalyzerKind::Competitive]
    );
    assert_eq!(report.overall_score, baseline.overall_score);
}

#[test]
fn test_competitive_analysis_in_report() {
    let report = analyze(URL, WELL_FORMED_PAGE);
    let competitive = report
        .competitive_analysis
        .completed()
        .expect("competitive analysis completed");

    assert_eq!(competitive.domain.as_deref(), Some("bakery.example"));
    assert_eq!(competitive.content_metrics.headings.total, 2);
    assert_eq!(competitive.content_metrics.images, 1);
    assert_eq!(competitive.content_metrics.outbound_links, 1);
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.starts_with("Expand the page content")));
}

#[test]
fn test_nested_results_are_reachable() {
    let report = analyze(URL, &stuffed_page());
    let keywords = report.keyword_analysis.completed().expect("keyword completed");
    let distribution: &[KeywordDistribution] = &keywords.density.distribution;
    assert!(!distribution.is_empty());
    assert!(distribution
        .iter()
        .all(|d| d.total == d.counts.iter().sum::<usize>()));

    let technical = report
        .technical_analysis
        .completed()
        .expect("technical completed");
    let scripts: &ScriptOptimization = &technical.loading_optimization.script_optimization;
    assert_eq!(scripts.total_scripts, 0);
}
