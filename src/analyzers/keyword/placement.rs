//! Where the primary keywords appear on the page.

use serde::Serialize;

use crate::document::Document;
use crate::utils::text::{clamp_score, percentage};

/// Zone weights, in the order the zones are reported.
const TITLE_WEIGHT: f64 = 0.3;
const H1_WEIGHT: f64 = 0.2;
const H2_WEIGHT: f64 = 0.15;
const URL_WEIGHT: f64 = 0.15;
const FIRST_PARAGRAPH_WEIGHT: f64 = 0.1;
const ALT_TEXT_WEIGHT: f64 = 0.1;

/// Primary keywords found in one page zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneMatches {
    pub keywords: Vec<String>,
    pub count: usize,
}

impl ZoneMatches {
    /// Keywords contained (as substrings) in any of `texts`.
    fn find(keywords: &[&str], texts: &[String]) -> Self {
        let found: Vec<String> = keywords
            .iter()
            .filter(|keyword| texts.iter().any(|text| text.contains(*keyword)))
            .map(|keyword| keyword.to_string())
            .collect();
        Self {
            count: found.len(),
            keywords: found,
        }
    }

    fn share(&self, total: usize) -> f64 {
        percentage(self.count, total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordPlacement {
    pub title: ZoneMatches,
    pub h1: ZoneMatches,
    pub h2: ZoneMatches,
    pub url: ZoneMatches,
    pub first_paragraph: ZoneMatches,
    pub alt_text: ZoneMatches,
    pub placement_score: u8,
}

/// Address the page declares for itself: canonical link, then `og:url`.
fn declared_url(doc: &Document) -> String {
    doc.find_links_with_rel("canonical")
        .first()
        .and_then(|link| link.attr("href"))
        .or_else(|| doc.meta_content("property", "og:url"))
        .unwrap_or_default()
        .to_lowercase()
}

pub fn analyze_placement(doc: &Document, primary: &[&str]) -> KeywordPlacement {
    let lower = |text: String| text.to_lowercase();

    let title: Vec<String> = doc.title().map(lower).into_iter().collect();
    let h1: Vec<String> = doc
        .find_first("h1")
        .map(|h| lower(h.stripped_text()))
        .into_iter()
        .collect();
    let h2: Vec<String> = doc
        .find_all("h2")
        .iter()
        .map(|h| lower(h.stripped_text()))
        .collect();
    let url = vec![declared_url(doc)];
    let first_paragraph: Vec<String> = doc
        .find_first("p")
        .map(|p| lower(p.stripped_text()))
        .into_iter()
        .collect();
    let alt_texts: Vec<String> = doc
        .find_all("img")
        .iter()
        .filter_map(|img| img.attr("alt"))
        .map(str::to_lowercase)
        .collect();

    let title = ZoneMatches::find(primary, &title);
    let h1 = ZoneMatches::find(primary, &h1);
    let h2 = ZoneMatches::find(primary, &h2);
    let url = ZoneMatches::find(primary, &url);
    let first_paragraph = ZoneMatches::find(primary, &first_paragraph);
    let alt_text = ZoneMatches::find(primary, &alt_texts);

    let placement_score = if primary.is_empty() {
        0
    } else {
        let total = primary.len();
        clamp_score(
            title.share(total) * TITLE_WEIGHT
                + h1.share(total) * H1_WEIGHT
                + h2.share(total) * H2_WEIGHT
                + url.share(total) * URL_WEIGHT
                + first_paragraph.share(total) * FIRST_PARAGRAPH_WEIGHT
                + alt_text.share(total) * ALT_TEXT_WEIGHT,
        )
    };

    KeywordPlacement {
        title,
        h1,
        h2,
        url,
        first_paragraph,
        alt_text,
        placement_score,
    }
}
