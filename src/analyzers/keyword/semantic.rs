//! Terms that appear next to the primary keywords.

use serde::Serialize;

use crate::document::Document;
use crate::utils::text::{word_tokens, MIN_KEYWORD_CHARS};

/// Words on each side of a keyword occurrence.
const CONTEXT_WINDOW: usize = 3;
const MAX_RELATED_TERMS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedTerms {
    pub keyword: String,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticRelevance {
    pub related_terms: Vec<RelatedTerms>,
}

pub fn analyze_semantic_relevance(doc: &Document, primary: &[&str]) -> SemanticRelevance {
    let paragraphs: Vec<Vec<String>> = doc
        .find_all("p")
        .iter()
        .map(|p| p.stripped_text().to_lowercase())
        .map(|text| word_tokens(&text))
        .collect();

    let related_terms = primary
        .iter()
        .map(|keyword| RelatedTerms {
            keyword: keyword.to_string(),
            terms: context_terms(&paragraphs, keyword),
        })
        .collect();

    SemanticRelevance { related_terms }
}

/// Distinct words near `keyword`, most frequent first; ties keep first-seen order.
fn context_terms(paragraphs: &[Vec<String>], keyword: &str) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for words in paragraphs {
        for (i, _) in words.iter().enumerate().filter(|(_, w)| *w == keyword) {
            let start = i.saturating_sub(CONTEXT_WINDOW);
            let end = (i + CONTEXT_WINDOW + 1).min(words.len());
            for word in words[start..end]
                .iter()
                .filter(|word| word.chars().count() > MIN_KEYWORD_CHARS && *word != keyword)
            {
                match counts.iter_mut().find(|(term, _)| term == word) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((word.clone(), 1)),
                }
            }
        }
    }
    // Stable sort
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(MAX_RELATED_TERMS)
        .map(|(term, _)| term)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_window_terms() {
        let doc = Document::parse(
            "<p>Durable steel widgets built for harsh outdoor conditions every day.</p>",
        );
        let result = analyze_semantic_relevance(&doc, &["widgets"]);
        assert_eq!(result.related_terms.len(), 1);
        assert_eq!(result.related_terms[0].keyword, "widgets");
        assert_eq!(
            result.related_terms[0].terms,
            vec!["durable", "steel", "built", "harsh"]
        );
    }

    #[test]
    fn test_terms_capped_and_deduplicated() {
        let doc = Document::parse(
            "<p>alpha bravo charlie widget delta echo foxtrot</p>\
             <p>alpha golf hotel widget india juliet kilo</p>",
        );
        let result = analyze_semantic_relevance(&doc, &["widget"]);
        assert_eq!(
            result.related_terms[0].terms,
            vec!["alpha", "bravo", "charlie", "delta", "echo"]
        );
    }

    #[test]
    fn test_frequent_terms_ranked_first() {
        let doc = Document::parse(
            "<p>fabric widget blue</p><p>green shiny widget blue</p>",
        );
        let result = analyze_semantic_relevance(&doc, &["widget"]);
        assert_eq!(
            result.related_terms[0].terms,
            vec!["blue", "fabric", "green", "shiny"]
        );
    }

    #[test]
    fn test_keyword_without_paragraphs() {
        let doc = Document::parse("<div>widget</div>");
        let result = analyze_semantic_relevance(&doc, &["widget"]);
        assert!(result.related_terms[0].terms.is_empty());
    }
}
