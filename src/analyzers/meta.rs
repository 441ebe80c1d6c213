//! Metadata analysis.
//!
//! Checks the tags search engines and social networks read before they read
//! the page body:
//! - `<title>` length, repetition and brand separator
//! - meta description (with a paragraph fallback) and call-to-action wording
//! - meta keywords count, length and overlap
//! - Open Graph and Twitter Card completeness
//! - author, language, charset and icons

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::{repeated_word, Analyzer, AnalyzerKind, AnalyzerOutput, Extra, Page};
use crate::document::Document;
use crate::error_handling::AnalyzerError;
use crate::utils::compile_regex_unsafe;

const TITLE_MIN_CHARS: usize = 10;
const TITLE_MAX_CHARS: usize = 60;
const DESCRIPTION_MIN_CHARS: usize = 50;
const DESCRIPTION_MAX_CHARS: usize = 160;
const KEYWORDS_MIN_COUNT: usize = 3;
const KEYWORDS_MAX_COUNT: usize = 10;
const KEYWORD_MAX_CHARS: usize = 30;
const KEYWORD_OVERLAP_MIN_CHARS: usize = 5;
const BRAND_PREFIX_MAX_CHARS: usize = 20;

const TITLE_SEPARATORS: &[&str] = &[" | ", " - ", " – ", " — ", " :: ", " > "];

const OPEN_GRAPH_TAGS: &[&str] = &["og:title", "og:description", "og:image", "og:url", "og:type"];
const TWITTER_TAGS: &[&str] = &[
    "twitter:card",
    "twitter:title",
    "twitter:description",
    "twitter:image",
];

static CALL_TO_ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"\b(learn|discover|find out|see|read|order|buy|shop|call|contact|get|try|start|explore|sign up|subscribe|download|book)\b",
        "CALL_TO_ACTION_RE",
    )
});

/// Which side of a title separator the brand sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandPosition {
    Prefix,
    Suffix,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleAnalysis {
    pub content: Option<String>,
    pub length: usize,
    pub is_optimized: bool,
    pub issues: Vec<String>,
    pub has_brand: bool,
    pub brand_position: Option<BrandPosition>,
}

/// Where the analyzed description text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionSource {
    MetaTag,
    Paragraphs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionAnalysis {
    pub content: Option<String>,
    pub source: Option<DescriptionSource>,
    pub length: usize,
    pub is_optimized: bool,
    pub issues: Vec<String>,
    pub has_cta: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaKeywordsAnalysis {
    pub content: Option<String>,
    pub keywords: Vec<String>,
    pub count: usize,
    pub is_optimized: bool,
    pub issues: Vec<String>,
}

/// One social tag family (Open Graph or Twitter Cards).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialTags {
    pub has_tags: bool,
    pub is_complete: bool,
    /// Expected tag name to its `content`, in the order the tags are checked.
    pub values: Vec<(String, Option<String>)>,
    pub missing: Vec<String>,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageInfo {
    pub has_lang_attribute: bool,
    pub lang: Option<String>,
    pub content_language: Option<String>,
    pub is_consistent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharsetInfo {
    pub has_charset: bool,
    pub charset: Option<String>,
    pub is_utf8: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconInfo {
    pub has_favicon: bool,
    pub has_apple_icon: bool,
    pub icon_sizes: Vec<String>,
    pub has_multiple_sizes: bool,
}

/// Result of [`MetaAnalyzer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaAnalysis {
    pub title: TitleAnalysis,
    pub description: DescriptionAnalysis,
    pub keywords: MetaKeywordsAnalysis,
    pub open_graph: SocialTags,
    pub twitter_cards: SocialTags,
    pub author: Option<String>,
    pub language: LanguageInfo,
    pub charset: CharsetInfo,
    pub icons: IconInfo,
    pub meta_score: u8,
    pub recommendations: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl AnalyzerOutput for MetaAnalysis {
    fn score(&self) -> u8 {
        self.meta_score
    }

    fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}

/// Analyzes title, description, keywords and social metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaAnalyzer;

impl Analyzer for MetaAnalyzer {
    type Output = MetaAnalysis;

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Meta
    }

    fn analyze(&self, page: &Page<'_>) -> Result<MetaAnalysis, AnalyzerError> {
        let doc = page.document;

        let title = analyze_title(doc);
        let description = analyze_description(doc);
        let keywords = analyze_keywords(doc);
        let open_graph = analyze_social(doc, "property", OPEN_GRAPH_TAGS, "Open Graph");
        let twitter_cards = analyze_social(doc, "name", TWITTER_TAGS, "Twitter Card");
        let author = doc.meta_content("name", "author").map(str::to_string);
        let language = analyze_language(doc);
        let charset = analyze_charset(doc);
        let icons = analyze_icons(doc);

        let mut recommendations = Vec::new();
        recommendations.extend(title.issues.iter().cloned());
        recommendations.extend(description.issues.iter().cloned());
        recommendations.extend(keywords.issues.iter().cloned());
        if !open_graph.has_tags {
            recommendations.push(
                "Add Open Graph metadata for better previews when the page is shared on social networks."
                    .to_string(),
            );
        }
        recommendations.extend(open_graph.issues.iter().cloned());
        if !twitter_cards.has_tags {
            recommendations.push(
                "Add Twitter Card metadata to improve how the page appears on Twitter.".to_string(),
            );
        }
        recommendations.extend(twitter_cards.issues.iter().cloned());
        if !icons.has_favicon {
            recommendations.push("Add a favicon so visitors can recognize your site.".to_string());
        }
        if !language.has_lang_attribute {
            recommendations.push(
                "Set the lang attribute on the html tag so the page language is detected correctly."
                    .to_string(),
            );
        }

        let meta_score = [
            (title.issues.is_empty(), 25u32),
            (description.issues.is_empty(), 25),
            (open_graph.has_tags, 15),
            (twitter_cards.has_tags, 10),
            (icons.has_favicon, 10),
            (language.has_lang_attribute, 15),
        ]
        .iter()
        .filter(|(passed, _)| *passed)
        .map(|(_, weight)| weight)
        .sum::<u32>()
        .min(100) as u8;

        log::debug!(
            "Meta analysis for {}: score {}, {} recommendation(s)",
            page.url,
            meta_score,
            recommendations.len()
        );

        Ok(MetaAnalysis {
            title,
            description,
            keywords,
            open_graph,
            twitter_cards,
            author,
            language,
            charset,
            icons,
            meta_score,
            recommendations,
            extra: Extra::new(),
        })
    }
}

fn analyze_title(doc: &Document) -> TitleAnalysis {
    let Some(title) = doc.title().filter(|t| !t.is_empty()) else {
        return TitleAnalysis {
            content: None,
            length: 0,
            is_optimized: false,
            issues: vec!["Missing page title. Add a <title> to the page.".to_string()],
            has_brand: false,
            brand_position: None,
        };
    };

    let length = title.chars().count();
    let mut issues = Vec::new();
    if length < TITLE_MIN_CHARS {
        issues.push(format!(
            "Title is too short (less than {} characters).",
            TITLE_MIN_CHARS
        ));
    } else if length > TITLE_MAX_CHARS {
        issues.push(format!(
            "Title is too long (more than {} characters). Shorten it for better SEO.",
            TITLE_MAX_CHARS
        ));
    }
    if let Some(word) = repeated_word(&title, 2, 4) {
        issues.push(format!(
            "Possible keyword stuffing in title (repeated '{}').",
            word
        ));
    }

    let brand_position = TITLE_SEPARATORS
        .iter()
        .find_map(|separator| title.split_once(separator))
        .map(|(before, _)| {
            if before.chars().count() < BRAND_PREFIX_MAX_CHARS {
                BrandPosition::Prefix
            } else {
                BrandPosition::Suffix
            }
        });

    TitleAnalysis {
        content: Some(title),
        length,
        is_optimized: issues.is_empty(),
        issues,
        has_brand: brand_position.is_some(),
        brand_position,
    }
}

fn analyze_description(doc: &Document) -> DescriptionAnalysis {
    let from_meta = doc
        .meta_content("name", "description")
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(|content| (content.to_string(), DescriptionSource::MetaTag));

    let found = from_meta.or_else(|| {
        let joined = doc
            .find_all("p")
            .iter()
            .take(2)
            .map(|p| p.stripped_text())
            .collect::<Vec<_>>()
            .join(" ");
        let joined = joined.trim();
        (!joined.is_empty()).then(|| (joined.to_string(), DescriptionSource::Paragraphs))
    });

    let Some((description, source)) = found else {
        return DescriptionAnalysis {
            content: None,
            source: None,
            length: 0,
            is_optimized: false,
            issues: vec![
                "Missing meta description. Add a short summary (150-160 characters).".to_string(),
            ],
            has_cta: false,
        };
    };

    let length = description.chars().count();
    let mut issues = Vec::new();
    if length < DESCRIPTION_MIN_CHARS {
        issues.push(format!(
            "Meta description is too short (less than {} characters).",
            DESCRIPTION_MIN_CHARS
        ));
    } else if length > DESCRIPTION_MAX_CHARS {
        issues.push(format!(
            "Meta description is too long (more than {} characters). Shorten it so it is not cut off in search results.",
            DESCRIPTION_MAX_CHARS
        ));
    }
    let has_cta = CALL_TO_ACTION_RE.is_match(&description.to_lowercase());
    if let Some(word) = repeated_word(&description, 3, 10) {
        issues.push(format!(
            "Possible keyword stuffing in description (repeated '{}').",
            word
        ));
    }

    DescriptionAnalysis {
        content: Some(description),
        source: Some(source),
        length,
        is_optimized: issues.is_empty(),
        issues,
        has_cta,
    }
}

fn analyze_keywords(doc: &Document) -> MetaKeywordsAnalysis {
    let content = doc
        .meta_content("name", "keywords")
        .filter(|content| !content.trim().is_empty());

    let Some(content) = content else {
        return MetaKeywordsAnalysis {
            content: None,
            keywords: Vec::new(),
            count: 0,
            is_optimized: false,
            issues: vec![
                "Missing meta keywords. They carry little ranking weight, but listing relevant keywords is still recommended."
                    .to_string(),
            ],
        };
    };

    let keywords: Vec<String> = content
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();

    let mut issues = Vec::new();
    if keywords.len() < KEYWORDS_MIN_COUNT {
        issues.push("Too few keywords. Add more relevant keywords.".to_string());
    } else if keywords.len() > KEYWORDS_MAX_COUNT {
        issues.push("Too many keywords. Trim the list to the most relevant ones.".to_string());
    }
    if keywords.iter().any(|k| k.chars().count() > KEYWORD_MAX_CHARS) {
        issues.push(
            "Some keywords are too long. Use shorter, more precise terms.".to_string(),
        );
    }
    let overlapping = keywords.iter().enumerate().any(|(i, k1)| {
        k1.chars().count() > KEYWORD_OVERLAP_MIN_CHARS
            && keywords
                .iter()
                .enumerate()
                .any(|(j, k2)| i != j && k2.contains(k1.as_str()))
    });
    if overlapping {
        issues.push("Similar or overlapping keywords detected.".to_string());
    }

    MetaKeywordsAnalysis {
        content: Some(content.to_string()),
        count: keywords.len(),
        keywords,
        is_optimized: issues.is_empty(),
        issues,
    }
}

fn analyze_social(doc: &Document, attr: &str, tags: &[&str], family: &str) -> SocialTags {
    let values: Vec<(String, Option<String>)> = tags
        .iter()
        .map(|tag| {
            let content = doc
                .meta(attr, tag)
                .map(|meta| meta.attr("content").map(str::to_string));
            (tag.to_string(), content)
        })
        .filter_map(|(tag, found)| found.map(|content| (tag, content)))
        .collect();

    let missing: Vec<String> = tags
        .iter()
        .filter(|tag| !values.iter().any(|(name, _)| name == *tag))
        .map(|tag| tag.to_string())
        .collect();

    let has_tags = !values.is_empty();
    let is_complete = missing.is_empty();
    let mut issues = Vec::new();
    if has_tags && !is_complete {
        issues.push(format!(
            "Incomplete {} metadata. Missing: {}.",
            family,
            missing.join(", ")
        ));
    }

    SocialTags {
        has_tags,
        is_complete,
        values,
        missing,
        issues,
    }
}

fn analyze_language(doc: &Document) -> LanguageInfo {
    let lang = doc
        .html_lang()
        .filter(|lang| !lang.is_empty())
        .map(str::to_string);
    let content_language = doc
        .meta_content("http-equiv", "content-language")
        .map(str::to_string);

    let is_consistent = match (&lang, &content_language) {
        (Some(lang), Some(declared)) => lang == declared,
        _ => true,
    };

    LanguageInfo {
        has_lang_attribute: lang.is_some(),
        lang,
        content_language,
        is_consistent,
    }
}

fn analyze_charset(doc: &Document) -> CharsetInfo {
    let meta_charset = doc
        .find_all("meta")
        .into_iter()
        .find_map(|meta| meta.attr("charset"))
        .filter(|charset| !charset.is_empty())
        .map(str::to_string);

    let equiv_charset = doc
        .meta_content("http-equiv", "Content-Type")
        .and_then(|content| content.split_once("charset="))
        .map(|(_, charset)| charset.trim().to_string())
        .filter(|charset| !charset.is_empty());

    let charset = meta_charset.or(equiv_charset);
    let is_utf8 = charset
        .as_deref()
        .is_some_and(|c| c.to_lowercase().contains("utf-8"));

    CharsetInfo {
        has_charset: charset.is_some(),
        charset,
        is_utf8,
    }
}

fn analyze_icons(doc: &Document) -> IconInfo {
    let icon_links: Vec<_> = doc
        .find_all("link")
        .into_iter()
        .filter(|link| link.rel_tokens().iter().any(|rel| rel.contains("icon")))
        .collect();

    let has_favicon = !doc.find_links_with_rel("icon").is_empty();
    let has_apple_icon = !doc.find_links_with_rel("apple-touch-icon").is_empty();
    let icon_sizes: Vec<String> = icon_links
        .iter()
        .filter_map(|link| link.attr("sizes"))
        .map(str::to_string)
        .collect();

    IconInfo {
        has_favicon,
        has_apple_icon,
        has_multiple_sizes: icon_sizes.len() > 1,
        icon_sizes,
    }
}
