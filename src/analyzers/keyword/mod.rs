//! Keyword optimization analysis.
//!
//! This module provides:
//! - Meta keyword extraction, supplemented by description words
//! - Keyword detection from the visible page text
//! - Placement of the primary keywords in title, headings, URL, first
//!   paragraph and image alt text
//! - Density and distribution across the text
//! - Related terms found next to the primary keywords
//!
//! Problems found along the way become [`KeywordIssue`]s, and every issue kind
//! maps to exactly one recommendation.

mod density;
mod placement;
mod semantic;

use serde::Serialize;

use super::{Analyzer, AnalyzerKind, AnalyzerOutput, Extra, Page};
use crate::document::Document;
use crate::error_handling::AnalyzerError;
use crate::utils::text::{
    clamp_score, is_stop_word, keyword_candidates, percentage, round_to, top_frequencies,
    word_tokens, MIN_KEYWORD_CHARS,
};

pub use density::{DensityAnalysis, KeywordDistribution};
pub use placement::{KeywordPlacement, ZoneMatches};
pub use semantic::{RelatedTerms, SemanticRelevance};

const DETECTED_TOP_N: usize = 10;
const PLACEMENT_TOP_N: usize = 5;
const SEMANTIC_TOP_N: usize = 3;
const MIN_TOTAL_WORDS: usize = 300;
const WEAK_PLACEMENT: u8 = 50;
const FAIR_PLACEMENT: u8 = 70;
/// Density (percent) both top keywords must exceed to compete with each other.
const CANNIBALIZATION_MIN_DENSITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaKeywords {
    pub has_meta_keywords: bool,
    pub keywords: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedKeyword {
    pub keyword: String,
    pub count: usize,
    /// Percent of filtered words, one decimal.
    pub density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedKeywords {
    pub keywords: Vec<DetectedKeyword>,
    /// Words left after stop-word and length filtering.
    pub total_words: usize,
}

impl DetectedKeywords {
    /// The `n` most frequent keywords.
    fn top(&self, n: usize) -> Vec<&str> {
        self.keywords
            .iter()
            .take(n)
            .map(|k| k.keyword.as_str())
            .collect()
    }
}

/// A keyword targeting problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordIssue {
    MetaMismatch,
    MissingFromTitle,
    MissingFromH1,
    Stuffing(Vec<String>),
    Cannibalization,
}

impl KeywordIssue {
    pub fn message(&self) -> String {
        match self {
            KeywordIssue::MetaMismatch => {
                "Meta keywords do not match the page content.".to_string()
            }
            KeywordIssue::MissingFromTitle => {
                "Primary keywords are missing from the page title.".to_string()
            }
            KeywordIssue::MissingFromH1 => {
                "Primary keywords are missing from the main heading (H1).".to_string()
            }
            KeywordIssue::Stuffing(keywords) => {
                format!("Keyword stuffing detected: {}.", keywords.join(", "))
            }
            KeywordIssue::Cannibalization => {
                "Possible keyword cannibalization: the top keywords overlap.".to_string()
            }
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            KeywordIssue::MetaMismatch => {
                "Update the meta keywords so they match the actual page content."
            }
            KeywordIssue::MissingFromTitle => "Add the primary keywords to the page title.",
            KeywordIssue::MissingFromH1 => "Include the primary keywords in the H1 heading.",
            KeywordIssue::Stuffing(_) => {
                "Reduce keyword density and make the text read more naturally."
            }
            KeywordIssue::Cannibalization => {
                "Pick one primary keyword for the page and optimize for it."
            }
        }
    }
}

/// Result of [`KeywordAnalyzer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordAnalysis {
    pub meta_keywords: MetaKeywords,
    pub detected_keywords: DetectedKeywords,
    pub placement: KeywordPlacement,
    pub density: DensityAnalysis,
    pub semantic_relevance: SemanticRelevance,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub keyword_score: u8,
    #[serde(flatten)]
    pub extra: Extra,
}

impl AnalyzerOutput for KeywordAnalysis {
    fn score(&self) -> u8 {
        self.keyword_score
    }

    fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}

/// Detects the page's keywords and checks how well they are used.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAnalyzer;

impl Analyzer for KeywordAnalyzer {
    type Output = KeywordAnalysis;

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Keyword
    }

    fn analyze(&self, page: &Page<'_>) -> Result<KeywordAnalysis, AnalyzerError> {
        let doc = page.document;

        let meta_keywords = extract_meta_keywords(doc);
        let text = doc.visible_text();
        let detected_keywords = detect_keywords(&text);

        let placement =
            placement::analyze_placement(doc, &detected_keywords.top(PLACEMENT_TOP_N));
        let density = density::analyze_density(&text, &detected_keywords.keywords);
        let semantic_relevance =
            semantic::analyze_semantic_relevance(doc, &detected_keywords.top(SEMANTIC_TOP_N));

        let issues = check_issues(&meta_keywords, &detected_keywords, &placement, &density);

        let mut recommendations: Vec<String> = issues
            .iter()
            .map(|issue| issue.recommendation().to_string())
            .collect();
        if placement.placement_score < WEAK_PLACEMENT {
            recommendations.push(
                "Place keywords in the key page elements (title, H1, H2, first paragraph)."
                    .to_string(),
            );
        }
        if detected_keywords.total_words < MIN_TOTAL_WORDS {
            recommendations.push(
                "Add more content around the relevant keywords to improve relevance.".to_string(),
            );
        }
        if !meta_keywords.has_meta_keywords {
            recommendations
                .push("Add a keywords meta tag with relevant keywords.".to_string());
        }
        if placement.alt_text.count == 0 {
            recommendations
                .push("Use keywords in image alt attributes where appropriate.".to_string());
        }

        let keyword_score = score(&meta_keywords, &placement, &density, issues.len());

        let mut extra = Extra::new();
        extra.insert("visible_text_length".into(), text.chars().count().into());

        Ok(KeywordAnalysis {
            meta_keywords,
            detected_keywords,
            placement,
            density,
            semantic_relevance,
            issues: issues.iter().map(KeywordIssue::message).collect(),
            recommendations,
            keyword_score,
            extra,
        })
    }
}

/// Meta keywords (lowercased), followed by description words not already
/// covered by one of them.
fn extract_meta_keywords(doc: &Document) -> MetaKeywords {
    let meta = doc.meta("name", "keywords");
    let mut keywords: Vec<String> = meta
        .as_ref()
        .and_then(|m| m.attr("content"))
        .map(|content| {
            content
                .split(',')
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let description = doc.meta_content("name", "description").unwrap_or_default();
    for word in word_tokens(description) {
        if word.chars().count() <= MIN_KEYWORD_CHARS || is_stop_word(&word) {
            continue;
        }
        if !keywords.iter().any(|k| k.contains(word.as_str())) {
            keywords.push(word);
        }
    }

    MetaKeywords {
        has_meta_keywords: meta.is_some(),
        count: keywords.len(),
        keywords,
    }
}

fn detect_keywords(text: &str) -> DetectedKeywords {
    let filtered = keyword_candidates(&word_tokens(text));
    let keywords = top_frequencies(&filtered, DETECTED_TOP_N)
        .into_iter()
        .map(|(keyword, count)| DetectedKeyword {
            keyword,
            count,
            density: round_to(percentage(count, filtered.len()), 1),
        })
        .collect();

    DetectedKeywords {
        keywords,
        total_words: filtered.len(),
    }
}

fn check_issues(
    meta: &MetaKeywords,
    detected: &DetectedKeywords,
    placement: &KeywordPlacement,
    density: &DensityAnalysis,
) -> Vec<KeywordIssue> {
    let mut issues = Vec::new();

    let primary = detected.top(PLACEMENT_TOP_N);
    if meta.has_meta_keywords && !meta.keywords.iter().any(|k| primary.contains(&k.as_str())) {
        issues.push(KeywordIssue::MetaMismatch);
    }
    if placement.title.count == 0 {
        issues.push(KeywordIssue::MissingFromTitle);
    }
    if placement.h1.count == 0 {
        issues.push(KeywordIssue::MissingFromH1);
    }
    if density.has_keyword_stuffing {
        issues.push(KeywordIssue::Stuffing(density.potential_stuffing.clone()));
    }
    if let [first, second, ..] = detected.keywords.as_slice() {
        let both_prominent = first.density > CANNIBALIZATION_MIN_DENSITY
            && second.density > CANNIBALIZATION_MIN_DENSITY;
        let overlapping =
            first.keyword.contains(&second.keyword) || second.keyword.contains(&first.keyword);
        if both_prominent && overlapping {
            issues.push(KeywordIssue::Cannibalization);
        }
    }

    issues
}

fn score(
    meta: &MetaKeywords,
    placement: &KeywordPlacement,
    density: &DensityAnalysis,
    issue_count: usize,
) -> u8 {
    let mut score = 100.0;
    if !meta.has_meta_keywords {
        score -= 5.0;
    }
    if placement.placement_score < WEAK_PLACEMENT {
        score -= 20.0;
    } else if placement.placement_score < FAIR_PLACEMENT {
        score -= 10.0;
    }
    if density.has_keyword_stuffing {
        score -= 15.0;
    }
    score -= 5.0 * issue_count as f64;
    clamp_score(score)
}
