//! Content quality analysis.
//!
//! Looks at the main body text: how long it is, how readable, how it is
//! structured with headings and lists, and whether paragraphs repeat. Also
//! reports headings and images, because a missing H1 and images without alt
//! text are content problems a reader notices first.

use serde::Serialize;

use super::{Analyzer, AnalyzerKind, AnalyzerOutput, Extra, Page};
use crate::document::{Document, Element};
use crate::error_handling::AnalyzerError;
use crate::utils::text::{
    clamp_score, count_syllables, keyword_candidates, percentage, round_to, sentence_count,
    top_frequencies, word_count, word_tokens,
};
use crate::utils::{first_match, Candidate};

const THIN_CONTENT_WORDS: usize = 300;
const MAX_AVG_SENTENCE_WORDS: f64 = 25.0;
const MIN_STRUCTURE_SCORE: f64 = 0.7;
const MIN_READABILITY: u8 = 50;
const COMPLEX_WORD_SYLLABLES: usize = 3;
const DUPLICATE_MIN_CHARS: usize = 20;
const DENSITY_TOP_N: usize = 10;

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];
const LIST_TAGS: &[&str] = &["ul", "ol"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordDensity {
    pub keyword: String,
    /// Share of filtered words, in percent, one decimal.
    pub density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateParagraph {
    pub text: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateContent {
    pub has_duplicates: bool,
    pub duplicate_count: usize,
    pub duplicates: Vec<DuplicateParagraph>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub has_h1: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSummary {
    pub total_images: usize,
    pub img_without_alt: usize,
}

/// Result of [`ContentAnalyzer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentAnalysis {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub readability_score: u8,
    pub keyword_density: Vec<KeywordDensity>,
    pub structure_score: f64,
    pub is_thin_content: bool,
    pub duplicate_content: DuplicateContent,
    pub headings: Headings,
    pub images: ImageSummary,
    pub content_score: u8,
    pub recommendations: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl AnalyzerOutput for ContentAnalysis {
    fn score(&self) -> u8 {
        self.content_score
    }

    fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}

/// Scores body text length, readability, structure and duplication.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentAnalyzer;

impl Analyzer for ContentAnalyzer {
    type Output = ContentAnalysis;

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Content
    }

    fn analyze(&self, page: &Page<'_>) -> Result<ContentAnalysis, AnalyzerError> {
        let doc = page.document;

        let (source, main) = main_content(doc);
        let text = main.text();

        let word_count = word_count(&text);
        let sentence_count = sentence_count(&text);
        let avg_sentence_length = round_to(word_count as f64 / sentence_count.max(1) as f64, 1);
        let readability_score = readability(&text);
        let keyword_density = keyword_density(&text);
        let structure_score = round_to(structure_score(doc), 2);
        let is_thin_content = word_count < THIN_CONTENT_WORDS;
        let duplicate_content = duplicate_paragraphs(doc);
        let headings = headings(doc);
        let images = images(doc);

        let mut recommendations = Vec::new();
        if is_thin_content {
            recommendations.push(format!(
                "Content is too short. Important pages should have at least {} words.",
                THIN_CONTENT_WORDS
            ));
        }
        if avg_sentence_length > MAX_AVG_SENTENCE_WORDS {
            recommendations.push(
                "Average sentence length is too high. Shorten sentences for better readability."
                    .to_string(),
            );
        }
        if structure_score < MIN_STRUCTURE_SCORE {
            recommendations.push(
                "Improve content structure with subheadings (H2, H3) that split the text into logical sections."
                    .to_string(),
            );
        }
        if readability_score < MIN_READABILITY {
            recommendations.push(
                "Text is hard to read. Simplify the language and use shorter words and sentences."
                    .to_string(),
            );
        }
        if duplicate_content.has_duplicates {
            recommendations.push(
                "Duplicate paragraphs detected. Remove repeated content.".to_string(),
            );
        }
        if !headings.has_h1 {
            recommendations.push("Missing H1 heading. Add one main heading to the page.".to_string());
        }
        if images.img_without_alt > 0 {
            let noun = if images.img_without_alt == 1 {
                "image"
            } else {
                "images"
            };
            recommendations.push(format!(
                "{} {} without alt text. Add descriptive alt attributes.",
                images.img_without_alt, noun
            ));
        }

        let mut raw_score = 25.0 * structure_score + 25.0 * f64::from(readability_score) / 100.0;
        if !is_thin_content {
            raw_score += 25.0;
        }
        if avg_sentence_length <= MAX_AVG_SENTENCE_WORDS {
            raw_score += 15.0;
        }
        if !duplicate_content.has_duplicates {
            raw_score += 10.0;
        }
        let content_score = clamp_score(raw_score);

        let mut extra = Extra::new();
        extra.insert("main_content_source".into(), source.into());

        Ok(ContentAnalysis {
            word_count,
            sentence_count,
            avg_sentence_length,
            readability_score,
            keyword_density,
            structure_score,
            is_thin_content,
            duplicate_content,
            headings,
            images,
            content_score,
            recommendations,
            extra,
        })
    }
}

/// Picks the element holding the page's main content.
///
/// Tries the usual content containers in a fixed order and falls back to
/// `<body>`, then the whole document.
fn main_content(doc: &Document) -> (&'static str, Element<'_>) {
    let candidates: [Candidate<'_, Element<'_>>; 7] = [
        ("main", &|| doc.find_first("main")),
        ("#content", &|| doc.find_by_id("content")),
        ("#main-content", &|| doc.find_by_id("main-content")),
        (".content", &|| doc.find_by_class("content")),
        (".main-content", &|| doc.find_by_class("main-content")),
        ("article", &|| doc.find_first("article")),
        ("body", &|| doc.find_first("body")),
    ];
    first_match(&candidates).unwrap_or(("document", doc.root()))
}

/// 100 minus the percentage of words with three or more syllables.
fn readability(text: &str) -> u8 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0;
    }
    let complex = words
        .iter()
        .filter(|word| count_syllables(word) >= COMPLEX_WORD_SYLLABLES)
        .count();
    clamp_score(100.0 - percentage(complex, words.len()))
}

fn keyword_density(text: &str) -> Vec<KeywordDensity> {
    let filtered = keyword_candidates(&word_tokens(text));
    top_frequencies(&filtered, DENSITY_TOP_N)
        .into_iter()
        .map(|(keyword, count)| KeywordDensity {
            keyword,
            density: round_to(percentage(count, filtered.len()), 1),
        })
        .collect()
}

/// Heading-to-paragraph ratio (one heading per four paragraphs is ideal) at 70%
/// plus list presence at 30%, in `0.0..=1.0`.
fn structure_score(doc: &Document) -> f64 {
    let paragraphs = doc.count("p");
    let headings = doc.find_all_of(HEADING_TAGS).len();
    let has_lists = !doc.find_all_of(LIST_TAGS).is_empty();

    let text_blocks = (paragraphs + 1) as f64;
    let heading_ratio = (headings as f64 / (text_blocks / 4.0)).min(1.0);
    heading_ratio * 0.7 + if has_lists { 0.3 } else { 0.0 }
}

fn duplicate_paragraphs(doc: &Document) -> DuplicateContent {
    let mut seen: Vec<DuplicateParagraph> = Vec::new();
    for text in doc
        .find_all("p")
        .iter()
        .map(Element::stripped_text)
        .filter(|text| text.chars().count() > DUPLICATE_MIN_CHARS)
    {
        match seen.iter_mut().find(|entry| entry.text == text) {
            Some(entry) => entry.count += 1,
            None => seen.push(DuplicateParagraph { text, count: 1 }),
        }
    }

    let duplicates: Vec<DuplicateParagraph> =
        seen.into_iter().filter(|entry| entry.count > 1).collect();
    DuplicateContent {
        has_duplicates: !duplicates.is_empty(),
        duplicate_count: duplicates.len(),
        duplicates,
    }
}

fn headings(doc: &Document) -> Headings {
    let texts = |tag: &str| -> Vec<String> {
        doc.find_all(tag)
            .iter()
            .map(Element::stripped_text)
            .collect()
    };
    let h1 = texts("h1");
    Headings {
        has_h1: !h1.is_empty(),
        h1,
        h2: texts("h2"),
    }
}

fn images(doc: &Document) -> ImageSummary {
    let images = doc.find_all("img");
    ImageSummary {
        total_images: images.len(),
        img_without_alt: images
            .iter()
            .filter(|img| img.attr("alt").is_none_or(str::is_empty))
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(html: &str) -> ContentAnalysis {
        let doc = Document::parse(html);
        ContentAnalyzer
            .analyze(&Page::new("https://example.com/", &doc))
            .expect("content analysis never fails")
    }

    #[test]
    fn test_main_content_prefers_main_element() {
        let doc = Document::parse(
            r#"<body><div class="content">side</div><main>primary text</main></body>"#,
        );
        let (source, element) = main_content(&doc);
        assert_eq!(source, "main");
        assert_eq!(element.text(), "primary text");
    }

    #[test]
    fn test_main_content_falls_back_to_body() {
        let doc = Document::parse("<body><div>just a div</div></body>");
        assert_eq!(main_content(&doc).0, "body");
    }

    #[test]
    fn test_main_content_id_before_class() {
        let doc = Document::parse(
            r#"<div class="content">by class</div><div id="main-content">by id</div>"#,
        );
        let (source, element) = main_content(&doc);
        assert_eq!(source, "#main-content");
        assert_eq!(element.text(), "by id");
    }

    #[test]
    fn test_word_and_sentence_counts() {
        let result = analyze("<main>One two three. Four five! Six?</main>");
        assert_eq!(result.word_count, 6);
        assert_eq!(result.sentence_count, 3);
        assert_eq!(result.avg_sentence_length, 2.0);
        assert!(result.is_thin_content);
        assert_eq!(
            result.extra.get("main_content_source"),
            Some(&serde_json::json!("main"))
        );
    }

    #[test]
    fn test_readability() {
        assert_eq!(readability(""), 0);
        assert_eq!(readability("the cat sat"), 100);
        // "beautiful" (3) and "readability" (5) are complex: 2 of 4 words
        assert_eq!(readability("beautiful readability cat dog"), 50);
    }

    #[test]
    fn test_keyword_density_ordering_and_rounding() {
        let density = keyword_density("widgets widgets gadgets and the widgets gizmo");
        assert_eq!(density[0].keyword, "widgets");
        assert_eq!(density[0].density, 60.0);
        assert_eq!(density[1].keyword, "gadgets");
        assert_eq!(density[1].density, 20.0);
    }

    #[test]
    fn test_structure_score() {
        // 4 paragraphs, 1 heading, one list: min(1, 1 / (5 / 4)) * 0.7 + 0.3 = 0.86
        let result = analyze("<h2>h</h2><p>a</p><p>b</p><p>c</p><p>d</p><ul><li>x</li></ul>");
        assert_eq!(result.structure_score, 0.86);

        let flat = analyze("<p>a</p>");
        assert_eq!(flat.structure_score, 0.0);
        assert!(flat
            .recommendations
            .iter()
            .any(|r| r.starts_with("Improve content structure")));
    }

    #[test]
    fn test_duplicate_paragraphs() {
        let para = "This paragraph is thirty chars";
        assert_eq!(para.len(), 30);
        let html = format!("<p>{para}</p><p>{para}</p><p>short</p><p>short</p>");
        let result = analyze(&html);
        assert!(result.duplicate_content.has_duplicates);
        assert_eq!(result.duplicate_content.duplicate_count, 1);
        assert_eq!(result.duplicate_content.duplicates[0].count, 2);
    }

    #[test]
    fn test_headings_and_images() {
        let result = analyze(r#"<h2>Sub</h2><img src="a.png"><img src="b.png" alt=""><img src="c.png" alt="c">"#);
        assert!(!result.headings.has_h1);
        assert_eq!(result.headings.h2, vec!["Sub".to_string()]);
        assert_eq!(result.images.total_images, 3);
        assert_eq!(result.images.img_without_alt, 2);
        assert!(result
            .recommendations
            .iter()
            .any(|r| r == "2 images without alt text. Add descriptive alt attributes."));
        assert!(result
            .recommendations
            .iter()
            .any(|r| r.starts_with("Missing H1")));
    }

    #[test]
    fn test_no_images_no_alt_recommendation() {
        let result = analyze("<h1>Title</h1><p>text</p>");
        assert_eq!(result.images.img_without_alt, 0);
        assert!(!result.recommendations.iter().any(|r| r.contains("alt text")));
    }

    #[test]
    fn test_long_content_scores_high() {
        let sentence = "Simple words make a page easy to read for most people. ";
        let body = sentence.repeat(40);
        let html = format!(
            "<h1>Guide</h1><h2>Part</h2><p>{body}</p><p>More text here.</p><ul><li>x</li></ul>"
        );
        let result = analyze(&html);
        assert!(!result.is_thin_content);
        assert!(result.content_score >= 90, "score {}", result.content_score);
        assert!(result.recommendations.is_empty(), "{:?}", result.recommendations);
    }
}
