//! Generated page descriptions.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::document::{Document, Element};
use crate::utils::compile_regex_unsafe;
use crate::utils::text::normalize_whitespace;
use crate::utils::{first_match, Candidate};

/// Longest text handed to a generator, in chars.
const MAX_SOURCE_CHARS: usize = 1500;
const MAX_ABOUT_SECTIONS: usize = 3;

static ABOUT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"(?i)about", "ABOUT_RE"));

/// Shop and navigation words that add noise to a description.
static CHROME_WORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r"(?i)\b(cart|login|search|menu)\b|\$\d+\.\d+", "CHROME_WORDS_RE")
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedDescription {
    pub description: String,
    /// In `0.0..=1.0`.
    pub confidence: f64,
}

impl GeneratedDescription {
    /// Clamps `confidence` into `0.0..=1.0`; NaN becomes `0.0`.
    pub fn new(description: impl Into<String>, confidence: f64) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            description: description.into(),
            confidence,
        }
    }
}

/// Writes a short description of a page from its text.
pub trait DescriptionGenerator: Send + Sync {
    /// `None` when no description could be produced.
    fn generate(&self, text: &str) -> Option<GeneratedDescription>;
}

fn is_about_section(element: &Element<'_>) -> bool {
    matches!(element.tag_name(), "div" | "section")
        && (element.attr("id").is_some_and(|id| ABOUT_RE.is_match(id))
            || element.classes().iter().any(|class| ABOUT_RE.is_match(class)))
}

/// Text to describe the page from.
///
/// Prefers "about" sections, then `<main>`/`<article>`, then the visible
/// text with shop and navigation words removed. Capped at 1500 chars.
pub fn description_source_text(doc: &Document) -> String {
    let about = || {
        let sections: Vec<String> = doc
            .find_all_of(&["div", "section"])
            .iter()
            .filter(|element| is_about_section(element))
            .take(MAX_ABOUT_SECTIONS)
            .map(|element| element.text())
            .collect();
        (!sections.is_empty()).then(|| sections.join(" "))
    };
    let main = || doc.find_first("main").map(|element| element.text());
    let article = || doc.find_first("article").map(|element| element.text());

    let candidates: [Candidate<'_, String>; 3] =
        [("about", &about), ("main", &main), ("article", &article)];
    let text = match first_match(&candidates) {
        Some((_, text)) => text,
        None => normalize_whitespace(&CHROME_WORDS_RE.replace_all(&doc.visible_text(), "")),
    };

    text.chars().take(MAX_SOURCE_CHARS).collect()
}
