//! Keyword density and distribution across the text.

use serde::Serialize;

use super::DetectedKeyword;
use crate::utils::text::word_tokens;

/// Density (percent) above which a keyword counts as stuffed.
pub const STUFFING_THRESHOLD: f64 = 5.0;
const MIN_SECTIONS: usize = 3;
const MAX_PER_SECTION: usize = 2;
const MIN_OCCURRENCES: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordDistribution {
    pub keyword: String,
    /// Whole-word occurrences per section.
    pub counts: Vec<usize>,
    pub total: usize,
    pub is_well_distributed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityAnalysis {
    pub total_keywords: usize,
    pub distribution: Vec<KeywordDistribution>,
    pub potential_stuffing: Vec<String>,
    pub has_keyword_stuffing: bool,
}

/// Splits text into sections on `". "`.
///
/// Text with fewer than three sentences is cut into chunks of a third of its
/// length (in chars) instead, so there is always something to compare.
fn sections(text: &str) -> Vec<String> {
    let sentences: Vec<&str> = text.split(". ").collect();
    if sentences.len() >= MIN_SECTIONS {
        return sentences.into_iter().map(str::to_string).collect();
    }

    let chars: Vec<char> = text.chars().collect();
    let chunk_size = (chars.len() / MIN_SECTIONS).max(1);
    chars
        .chunks(chunk_size)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

pub fn analyze_density(text: &str, keywords: &[DetectedKeyword]) -> DensityAnalysis {
    let section_tokens: Vec<Vec<String>> = sections(text).iter().map(|s| word_tokens(s)).collect();

    let distribution: Vec<KeywordDistribution> = keywords
        .iter()
        .map(|detected| {
            let counts: Vec<usize> = section_tokens
                .iter()
                .map(|tokens| tokens.iter().filter(|t| **t == detected.keyword).count())
                .collect();
            let total: usize = counts.iter().sum();
            let peak = counts.iter().copied().max().unwrap_or(0);
            KeywordDistribution {
                keyword: detected.keyword.clone(),
                is_well_distributed: peak <= MAX_PER_SECTION && total >= MIN_OCCURRENCES,
                counts,
                total,
            }
        })
        .collect();

    let potential_stuffing: Vec<String> = keywords
        .iter()
        .filter(|detected| detected.density > STUFFING_THRESHOLD)
        .map(|detected| detected.keyword.clone())
        .collect();

    DensityAnalysis {
        total_keywords: distribution.len(),
        distribution,
        has_keyword_stuffing: !potential_stuffing.is_empty(),
        potential_stuffing,
    }
}
