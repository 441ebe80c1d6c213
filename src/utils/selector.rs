//! CSS selector parsing utilities.

use scraper::Selector;

/// Parses a CSS selector with a safe fallback.
///
/// If parsing fails, logs an error and returns a selector that matches nothing
/// (`*:not(*)`). Analyzers never see a selector error; a bad selector simply
/// finds no elements.
///
/// # Arguments
///
/// * `selector_str` - The CSS selector string to parse
/// * `context` - Context description for error logging (e.g., "meta analysis")
pub fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        Selector::parse("*:not(*)").expect(
            "Fallback selector '*:not(*)' should always parse - this is a programming error",
        )
    })
}

/// Parses a CSS selector that must succeed (for compile-time constants).
///
/// # Panics
///
/// Panics if the selector cannot be parsed (indicates a programming error).
pub fn parse_selector_unsafe(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}' in {}: {}. This is a programming error.",
            selector_str, context, e
        )
    })
}

/// Compiles a static regex pattern, panicking with context if it is malformed.
///
/// Only used for pattern constants, where a failure is a programming error.
pub fn compile_regex_unsafe(pattern: &str, context: &str) -> regex::Regex {
    regex::Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selector_with_fallback_valid() {
        let selector = parse_selector_with_fallback("meta[name='description']", "test");
        let document = scraper::Html::parse_document(
            r#"<html><head><meta name="description" content="x"></head></html>"#,
        );
        assert_eq!(document.select(&selector).count(), 1);
    }

    #[test]
    fn test_parse_selector_with_fallback_invalid_matches_nothing() {
        let selector = parse_selector_with_fallback("p[[[", "test");
        let document = scraper::Html::parse_document("<p>one</p><p>two</p>");
        assert_eq!(document.select(&selector).count(), 0);
    }

    #[test]
    #[should_panic(expected = "programming error")]
    fn test_parse_selector_unsafe_panics_on_invalid() {
        parse_selector_unsafe("a[[[", "test");
    }

    #[test]
    fn test_compile_regex_unsafe_valid() {
        let re = compile_regex_unsafe(r"\d+px", "test");
        assert!(re.is_match("12px"));
    }
}
