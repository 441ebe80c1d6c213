//! Internal linking structure.

use serde::Serialize;
use std::collections::BTreeSet;
use url::Url;

use crate::document::{AttrMatch, Document};

const SKIPPED_PREFIXES: &[&str] = &["#", "javascript:", "mailto:", "tel:"];
const SUFFICIENT_INTERNAL_LINKS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkAnalysis {
    pub internal_count: usize,
    pub unique_internal_count: usize,
    pub external_count: usize,
    /// H2/H3 headings whose text no link on the page uses.
    pub orphaned_headings: usize,
    pub has_sufficient_internal: bool,
    /// Sufficient internal links 60, any external link 20, no orphans 20.
    pub link_score: u8,
}

/// Where one `href` points relative to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LinkTarget {
    Internal(String),
    External,
    Skipped,
}

fn classify(href: &str, page: &Url) -> LinkTarget {
    let href = href.trim();
    if SKIPPED_PREFIXES.iter().any(|prefix| href.starts_with(prefix)) {
        return LinkTarget::Skipped;
    }

    let resolved = match page.join(href) {
        Ok(resolved) => resolved,
        // Unresolvable relative references still point at this site.
        Err(_) => return LinkTarget::Internal(href.to_string()),
    };

    let is_absolute = href.starts_with("//")
        || href.starts_with("http://")
        || href.starts_with("https://");
    if !is_absolute || same_site(&resolved, page) {
        LinkTarget::Internal(resolved.to_string())
    } else {
        LinkTarget::External
    }
}

fn same_site(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port() == b.port()
}

pub fn analyze_links(doc: &Document, page: &Url) -> LinkAnalysis {
    let links = doc.find_tag_by_attr("a", "href", AttrMatch::Present);

    let mut internal = Vec::new();
    let mut external_count = 0;
    for link in &links {
        match classify(link.attr_or("href", ""), page) {
            LinkTarget::Internal(target) => internal.push(target),
            LinkTarget::External => external_count += 1,
            LinkTarget::Skipped => {}
        }
    }
    let unique_internal_count = internal.iter().collect::<BTreeSet<_>>().len();

    let anchor_texts: Vec<String> = links.iter().map(|link| link.stripped_text()).collect();
    let orphaned_headings = doc
        .find_all_of(&["h2", "h3"])
        .iter()
        .map(|heading| heading.stripped_text())
        .filter(|heading| !anchor_texts.iter().any(|anchor| anchor.contains(heading.as_str())))
        .count();

    let has_sufficient_internal = unique_internal_count >= SUFFICIENT_INTERNAL_LINKS;
    let mut link_score = 0;
    if has_sufficient_internal {
        link_score += 60;
    }
    if external_count > 0 {
        link_score += 20;
    }
    if orphaned_headings == 0 {
        link_score += 20;
    }

    LinkAnalysis {
        internal_count: internal.len(),
        unique_internal_count,
        external_count,
        orphaned_headings,
        has_sufficient_internal,
        link_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://example.com/blog/post").expect("valid url")
    }

    #[test]
    fn test_classify_variants() {
        let page = page();
        assert_eq!(
            classify("/about", &page),
            LinkTarget::Internal("https://example.com/about".into())
        );
        assert_eq!(
            classify("next", &page),
            LinkTarget::Internal("https://example.com/blog/next".into())
        );
        assert_eq!(
            classify("https://example.com/x", &page),
            LinkTarget::Internal("https://example.com/x".into())
        );
        assert_eq!(classify("https://other.org/", &page), LinkTarget::External);
        assert_eq!(classify("//cdn.other.org/a.js", &page), LinkTarget::External);
        assert_eq!(
            classify("//example.com/a", &page),
            LinkTarget::Internal("https://example.com/a".into())
        );
        assert_eq!(classify("#top", &page), LinkTarget::Skipped);
        assert_eq!(classify("javascript:void(0)", &page), LinkTarget::Skipped);
        assert_eq!(classify("mailto:a@example.com", &page), LinkTarget::Skipped);
        assert_eq!(classify("tel:+100", &page), LinkTarget::Skipped);
    }

    #[test]
    fn test_link_score_full() {
        let doc = Document::parse(
            r#"<h2>Pricing</h2>
            <a href="/a">A</a><a href="/b">B</a><a href="/pricing">See Pricing</a>
            <a href="https://other.org">Other</a>"#,
        );
        let result = analyze_links(&doc, &page());
        assert_eq!(result.internal_count, 3);
        assert_eq!(result.unique_internal_count, 3);
        assert_eq!(result.external_count, 1);
        assert_eq!(result.orphaned_headings, 0);
        assert_eq!(result.link_score, 100);
    }

    #[test]
    fn test_duplicates_and_orphans() {
        let doc = Document::parse(
            r##"<h2>Unlinked</h2><h3>Also unlinked</h3>
            <a href="/a">A</a><a href="/a">A again</a><a href="#x">skip</a>"##,
        );
        let result = analyze_links(&doc, &page());
        assert_eq!(result.internal_count, 2);
        assert_eq!(result.unique_internal_count, 1);
        assert!(!result.has_sufficient_internal);
        assert_eq!(result.orphaned_headings, 2);
        assert_eq!(result.link_score, 0);
    }
}
