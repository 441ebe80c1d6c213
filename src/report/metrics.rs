//! Summary counts kept at the top level of every report.

use serde::Serialize;
use url::Url;

use crate::document::{AttrMatch, Document};

/// Headline numbers for a page, independent of any analyzer's result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetrics {
    pub title: Option<String>,
    pub h1_tags: Vec<String>,
    pub h2_tags: Vec<String>,
    /// Images with a missing or empty `alt`.
    pub img_without_alt: usize,
    /// Links whose `href` starts with `/`.
    pub internal_links: usize,
    /// Other links whose `href` parses as a URL with a host.
    pub external_links: usize,
}

impl PageMetrics {
    pub fn collect(doc: &Document) -> Self {
        let hrefs: Vec<&str> = doc
            .find_tag_by_attr("a", "href", AttrMatch::Present)
            .iter()
            .filter_map(|link| link.attr("href"))
            .collect();
        let internal_links = hrefs.iter().filter(|href| href.starts_with('/')).count();
        let external_links = hrefs
            .iter()
            .filter(|href| !href.starts_with('/'))
            .filter(|href| Url::parse(href).is_ok_and(|url| url.host().is_some()))
            .count();

        let stripped = |tag: &str| -> Vec<String> {
            doc.find_all(tag)
                .iter()
                .map(|heading| heading.stripped_text())
                .collect()
        };

        Self {
            title: doc.title().filter(|title| !title.is_empty()),
            h1_tags: stripped("h1"),
            h2_tags: stripped("h2"),
            img_without_alt: doc
                .find_all("img")
                .iter()
                .filter(|img| img.attr("alt").is_none_or(str::is_empty))
                .count(),
            internal_links,
            external_links,
        }
    }
}
