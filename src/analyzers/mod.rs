//! Page analyzers.
//!
//! Each analyzer inspects one [`Document`] (plus the page URL) and produces a
//! typed result with a 0-100 score and a list of recommendations. Analyzers are
//! stateless and independent of each other: none reads another's output, so
//! they can run in any order and the report aggregator can isolate failures
//! per analyzer.
//!
//! - [`MetaAnalyzer`]: title, description, keywords, social tags, icons
//! - [`ContentAnalyzer`]: length, readability, structure, duplicates
//! - [`TechnicalAnalyzer`]: canonical, robots, URL hygiene, schema, loading, links
//! - [`MobileAnalyzer`]: viewport, touch targets, fonts, responsive media
//! - [`KeywordAnalyzer`]: detected keywords, placement, density, semantics
//! - [`CompetitiveAnalyzer`]: content volume benchmarks and targeted phrases

mod competitive;
mod content;
mod keyword;
mod meta;
mod mobile;
mod technical;

use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;

use crate::document::Document;
use crate::error_handling::AnalyzerError;

pub use competitive::{
    CompetitiveAnalysis, CompetitiveAnalyzer, ContentMetrics, HeadingCounts, PotentialKeywords,
};
pub use content::{ContentAnalysis, ContentAnalyzer};
pub use keyword::{
    DensityAnalysis, KeywordAnalysis, KeywordAnalyzer, KeywordDistribution, KeywordIssue,
    KeywordPlacement, RelatedTerms, SemanticRelevance, ZoneMatches,
};
pub use meta::{DescriptionSource, MetaAnalysis, MetaAnalyzer};
pub use mobile::{MobileAnalysis, MobileAnalyzer};
pub use technical::{
    LinkAnalysis, LoadingOptimization, SchemaMarkup, ScriptOptimization, TechnicalAnalysis,
    TechnicalAnalyzer, UrlAnalysis,
};

/// Free-form, non-scoring details attached to an analyzer result.
///
/// Flattened into the result object when serialized; empty maps add nothing.
pub type Extra = std::collections::BTreeMap<String, serde_json::Value>;

/// The input shared by every analyzer for one run.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    /// URL the HTML was obtained from, as given by the caller.
    pub url: &'a str,
    pub document: &'a Document,
}

impl<'a> Page<'a> {
    pub fn new(url: &'a str, document: &'a Document) -> Self {
        Self { url, document }
    }
}

/// Score and recommendations common to every analyzer result.
pub trait AnalyzerOutput {
    /// Analyzer score in `0..=100`.
    fn score(&self) -> u8;

    fn recommendations(&self) -> &[String];
}

/// A single page analyzer.
pub trait Analyzer {
    type Output: AnalyzerOutput + Serialize;

    fn kind(&self) -> AnalyzerKind;

    fn analyze(&self, page: &Page<'_>) -> Result<Self::Output, AnalyzerError>;
}

/// The analyzers, in execution and recommendation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIterMacro)]
pub enum AnalyzerKind {
    Meta,
    Content,
    Technical,
    Mobile,
    Keyword,
    Competitive,
}

impl AnalyzerKind {
    /// Key of the analyzer's slot in the report.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyzerKind::Meta => "meta_analysis",
            AnalyzerKind::Content => "content_analysis",
            AnalyzerKind::Technical => "technical_analysis",
            AnalyzerKind::Mobile => "mobile_analysis",
            AnalyzerKind::Keyword => "keyword_analysis",
            AnalyzerKind::Competitive => "competitive_analysis",
        }
    }

    /// Weight in the overall score. Keyword and competitive results are
    /// reported but not weighted.
    pub fn weight(&self) -> u32 {
        match self {
            AnalyzerKind::Meta => 30,
            AnalyzerKind::Content => 30,
            AnalyzerKind::Technical => 25,
            AnalyzerKind::Mobile => 15,
            AnalyzerKind::Keyword => 0,
            AnalyzerKind::Competitive => 0,
        }
    }
}

impl std::fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One analyzer's slot in a report: its result, or the error that replaced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalyzerSlot<T> {
    Completed(T),
    Failed { error: String },
}

impl<T: AnalyzerOutput> AnalyzerSlot<T> {
    pub fn failed(error: &AnalyzerError) -> Self {
        AnalyzerSlot::Failed {
            error: error.to_string(),
        }
    }

    /// Analyzer score, or `None` when the analyzer failed.
    pub fn score(&self) -> Option<u8> {
        match self {
            AnalyzerSlot::Completed(output) => Some(output.score()),
            AnalyzerSlot::Failed { .. } => None,
        }
    }

    /// Recommendations of a completed analyzer; failed slots contribute none.
    pub fn recommendations(&self) -> &[String] {
        match self {
            AnalyzerSlot::Completed(output) => output.recommendations(),
            AnalyzerSlot::Failed { .. } => &[],
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, AnalyzerSlot::Completed(_))
    }

    pub fn completed(&self) -> Option<&T> {
        match self {
            AnalyzerSlot::Completed(output) => Some(output),
            AnalyzerSlot::Failed { .. } => None,
        }
    }
}

/// Counts occurrences of lowercase whitespace-separated words longer than three
/// characters and returns the first (by first appearance) seen more than
/// `max_repeats` times, provided the text has more than `min_words` words.
pub(crate) fn repeated_word(text: &str, max_repeats: usize, min_words: usize) -> Option<String> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    if words.len() <= min_words {
        return None;
    }
    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for word in words.iter().filter(|w| w.chars().count() > 3) {
        *counts.entry(*word).or_default() += 1;
    }
    words
        .iter()
        .find(|word| counts.get(*word).is_some_and(|&count| count > max_repeats))
        .map(|word| word.to_string())
}
