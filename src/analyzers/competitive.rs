//! Competitive content benchmarks.
//!
//! Counts the content a competing page would be compared on (words,
//! headings, lists, media, outbound links) and lists the phrases the page
//! appears to target. Works offline; the score is reported but carries no
//! weight in the overall score.

use serde::Serialize;
use url::Url;

use super::{Analyzer, AnalyzerKind, AnalyzerOutput, Extra, Page};
use crate::document::Document;
use crate::error_handling::AnalyzerError;
use crate::utils::text::{clamp_score, is_stop_word, word_count, word_tokens, MIN_KEYWORD_CHARS};

const MIN_COMPETITIVE_WORDS: usize = 500;
const MIN_HEADINGS: usize = 3;
const MIN_IMAGES: usize = 2;
/// Words per content score point.
const WORDS_PER_POINT: f64 = 50.0;
const SINGLE_WORDS_TOP_N: usize = 10;
const PHRASES_TOP_N: usize = 5;

const KEYWORD_SOURCE_TAGS: &[&str] = &["h1", "h2", "h3"];
const VIDEO_TAGS: &[&str] = &["video", "iframe"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentMetrics {
    pub word_count: usize,
    pub headings: HeadingCounts,
    pub list_items: usize,
    pub images: usize,
    pub tables: usize,
    /// `<video>` and `<iframe>` embeds.
    pub videos: usize,
    pub outbound_links: usize,
    /// One point per 50 words, capped at 100.
    pub content_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PotentialKeywords {
    pub single_words: Vec<String>,
    pub phrases: Vec<String>,
}

/// Result of [`CompetitiveAnalyzer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitiveAnalysis {
    /// Host of the page URL, when it has one.
    pub domain: Option<String>,
    pub content_metrics: ContentMetrics,
    pub potential_keywords: PotentialKeywords,
    pub recommendations: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl AnalyzerOutput for CompetitiveAnalysis {
    fn score(&self) -> u8 {
        self.content_metrics.content_score
    }

    fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}

/// Benchmarks content volume and lists targeted phrases.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompetitiveAnalyzer;

impl Analyzer for CompetitiveAnalyzer {
    type Output = CompetitiveAnalysis;

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Competitive
    }

    fn analyze(&self, page: &Page<'_>) -> Result<CompetitiveAnalysis, AnalyzerError> {
        let doc = page.document;
        let domain = Url::parse(page.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string));

        let content_metrics = content_metrics(doc, domain.as_deref());
        let potential_keywords = potential_keywords(doc);

        let mut recommendations = Vec::new();
        if content_metrics.word_count < MIN_COMPETITIVE_WORDS {
            recommendations.push(format!(
                "Expand the page content to at least {} words. Competing pages usually cover the topic in more depth.",
                MIN_COMPETITIVE_WORDS
            ));
        }
        if content_metrics.headings.total < MIN_HEADINGS {
            recommendations.push(
                "Add more H1-H3 headings to give the content a clearer structure.".to_string(),
            );
        }
        if content_metrics.images < MIN_IMAGES {
            recommendations
                .push("Add more images to make the content more engaging.".to_string());
        }

        Ok(CompetitiveAnalysis {
            domain,
            content_metrics,
            potential_keywords,
            recommendations,
            extra: Extra::new(),
        })
    }
}

fn content_metrics(doc: &Document, domain: Option<&str>) -> ContentMetrics {
    let word_count = word_count(&doc.visible_text());
    let (h1, h2, h3) = (doc.count("h1"), doc.count("h2"), doc.count("h3"));

    ContentMetrics {
        word_count,
        headings: HeadingCounts {
            h1,
            h2,
            h3,
            total: h1 + h2 + h3,
        },
        list_items: doc.count("li"),
        images: doc.count("img"),
        tables: doc.count("table"),
        videos: doc.find_all_of(VIDEO_TAGS).len(),
        outbound_links: doc
            .find_all("a")
            .iter()
            .filter_map(|link| link.attr("href"))
            .filter(|href| is_outbound(href, domain))
            .count(),
        content_score: clamp_score((word_count as f64 / WORDS_PER_POINT).min(100.0).floor()),
    }
}

/// Absolute http(s) link to a host other than `domain`. Without a page
/// domain every absolute link counts.
fn is_outbound(href: &str, domain: Option<&str>) -> bool {
    let href = href.trim();
    if !(href.starts_with("http://") || href.starts_with("https://")) {
        return false;
    }
    match (Url::parse(href), domain) {
        (Ok(url), Some(domain)) => url.host_str() != Some(domain),
        (Ok(_), None) => true,
        (Err(_), _) => false,
    }
}

/// Words and 2-3 word phrases from the title and H1-H3 headings, in
/// first-seen order.
fn potential_keywords(doc: &Document) -> PotentialKeywords {
    let mut source = doc.title().unwrap_or_default();
    for heading in doc.find_all_of(KEYWORD_SOURCE_TAGS) {
        source.push(' ');
        source.push_str(&heading.text());
    }
    let words = word_tokens(&source);

    let mut single_words: Vec<String> = Vec::new();
    for word in words.iter().filter(|word| is_candidate(word.as_str())) {
        if single_words.len() == SINGLE_WORDS_TOP_N {
            break;
        }
        if !single_words.contains(word) {
            single_words.push(word.clone());
        }
    }

    let mut phrases: Vec<String> = Vec::new();
    for (i, word) in words.iter().enumerate() {
        if phrases.len() >= PHRASES_TOP_N {
            break;
        }
        if !is_candidate(word.as_str()) {
            continue;
        }
        for n in 2..=3 {
            if let Some(window) = words.get(i..i + n) {
                let phrase = window.join(" ");
                if !phrases.contains(&phrase) {
                    phrases.push(phrase);
                }
            }
        }
    }
    phrases.truncate(PHRASES_TOP_N);

    PotentialKeywords {
        single_words,
        phrases,
    }
}

fn is_candidate(word: &str) -> bool {
    word.chars().count() > MIN_KEYWORD_CHARS && !is_stop_word(word)
}
