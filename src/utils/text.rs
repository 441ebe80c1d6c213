//! Text statistics shared by the content and keyword analyzers.
//!
//! Word tokenization, stop-word filtering, frequency ranking, the simplified
//! syllable counter used for readability, and the rounding helpers that keep
//! reported percentages stable across runs.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use super::selector::compile_regex_unsafe;

/// Minimum length (exclusive) for a token to count as a keyword candidate.
pub const MIN_KEYWORD_CHARS: usize = 3;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex_unsafe(r"\b\w+\b", "WORD_RE"));

static SENTENCE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"[.!?]+", "SENTENCE_SPLIT_RE"));

/// Common English words that carry no topical signal.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "even",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "more", "most", "much", "must", "my", "myself", "no", "nor", "not", "now",
    "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over",
    "own", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Returns `true` for words on the fixed stop-word list (expects lowercase input).
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Splits text into lowercase word tokens (`\b\w+\b`).
pub fn word_tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Number of word tokens in `text`.
pub fn word_count(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}

/// Number of non-empty sentences after splitting on runs of `.`, `!` and `?`.
pub fn sentence_count(text: &str) -> usize {
    SENTENCE_SPLIT_RE
        .split(text)
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

/// Drops stop words and tokens of three characters or fewer.
pub fn keyword_candidates(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|word| word.chars().count() > MIN_KEYWORD_CHARS && !is_stop_word(word))
        .cloned()
        .collect()
}

/// Ranks words by frequency, breaking ties by first occurrence, and keeps the top `limit`.
pub fn top_frequencies(words: &[String], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, word) in words.iter().enumerate() {
        counts
            .entry(word.as_str())
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, position));
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first_seen))| (word, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(word, count, _)| (word.to_string(), count))
        .collect()
}

/// Counts syllables with a vowel-group heuristic.
///
/// Trailing `e`, then `es`, then `ed` are stripped before counting transitions
/// into a vowel group (`aeiouy`). Every word has at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let mut word = word.to_lowercase();
    for suffix in ["e", "es", "ed"] {
        if word.ends_with(suffix) {
            word.truncate(word.len() - suffix.len());
        }
    }

    let mut count = 0;
    let mut prev_is_vowel = false;
    for c in word.chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !prev_is_vowel {
            count += 1;
        }
        prev_is_vowel = is_vowel;
    }
    count.max(1)
}

/// `part / whole` as a percentage; a zero `whole` is treated as one.
pub fn percentage(part: usize, whole: usize) -> f64 {
    part as f64 / whole.max(1) as f64 * 100.0
}

/// Rounds to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Rounds and clamps a score into `0..=100`.
pub fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Collapses every whitespace run into a single space and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
