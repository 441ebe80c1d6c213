//! Technical SEO analysis.
//!
//! This module checks crawl and indexing signals:
//! - Canonical URL and robots directives
//! - URL path hygiene
//! - Hreflang alternates
//! - Schema.org structured data
//! - Sitemap reference
//! - Resource loading hints
//! - HTTPS
//! - Internal linking structure
//!
//! The page URL must be absolute; anything else fails the analyzer with
//! [`AnalyzerError::InvalidUrl`].

mod links;
mod loading;
mod schema;
mod url_hygiene;

use scraper::Selector;
use serde::Serialize;
use std::sync::LazyLock;
use url::Url;

use super::{Analyzer, AnalyzerKind, AnalyzerOutput, Extra, Page};
use crate::document::{AttrMatch, Document};
use crate::error_handling::AnalyzerError;
use crate::utils::parse_selector_unsafe;
use crate::utils::text::clamp_score;

pub use links::LinkAnalysis;
pub use loading::{LoadingOptimization, ScriptOptimization};
pub use schema::SchemaMarkup;
pub use url_hygiene::UrlAnalysis;

static HREFLANG_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe("link[rel~=alternate][href][hreflang]", "HREFLANG_SELECTOR")
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalInfo {
    pub has_canonical: bool,
    pub canonical_url: Option<String>,
    pub is_self_canonical: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RobotsInfo {
    pub has_robots_tag: bool,
    pub directives: Vec<String>,
    pub is_noindex: bool,
    pub is_nofollow: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HreflangInfo {
    pub has_hreflang: bool,
    pub languages: Vec<String>,
    pub count: usize,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapInfo {
    pub has_sitemap_link: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityInfo {
    pub is_https: bool,
    pub protocol: String,
}

/// Result of [`TechnicalAnalyzer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalAnalysis {
    pub canonical: CanonicalInfo,
    pub robots: RobotsInfo,
    pub url_analysis: UrlAnalysis,
    pub hreflang: HreflangInfo,
    pub schema_markup: SchemaMarkup,
    pub sitemap: SitemapInfo,
    pub loading_optimization: LoadingOptimization,
    pub security: SecurityInfo,
    pub internal_links: LinkAnalysis,
    pub technical_score: u8,
    pub recommendations: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl AnalyzerOutput for TechnicalAnalysis {
    fn score(&self) -> u8 {
        self.technical_score
    }

    fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}

/// Checks canonical, robots, URL, structured data, loading and linking signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct TechnicalAnalyzer;

impl Analyzer for TechnicalAnalyzer {
    type Output = TechnicalAnalysis;

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Technical
    }

    fn analyze(&self, page: &Page<'_>) -> Result<TechnicalAnalysis, AnalyzerError> {
        let url = Url::parse(page.url).map_err(|e| AnalyzerError::InvalidUrl {
            url: page.url.to_string(),
            reason: e.to_string(),
        })?;
        let doc = page.document;

        let canonical = check_canonical(doc, page.url);
        let robots = check_robots(doc);
        let url_analysis = url_hygiene::analyze_url(&url);
        let hreflang = check_hreflang(doc);
        let schema_markup = schema::check_schema_markup(doc);
        let sitemap = SitemapInfo {
            has_sitemap_link: !doc
                .find_tag_by_attr("a", "href", AttrMatch::Contains("sitemap.xml"))
                .is_empty(),
        };
        let loading_optimization = loading::check_loading_optimization(doc);
        let security = SecurityInfo {
            is_https: url.scheme() == "https",
            protocol: url.scheme().to_string(),
        };
        let internal_links = links::analyze_links(doc, &url);

        let mut recommendations = Vec::new();
        if !canonical.has_canonical {
            recommendations.push(
                "Add a canonical URL to prevent duplicate content issues.".to_string(),
            );
        }
        if !robots.has_robots_tag {
            recommendations
                .push("Add a robots meta tag to control how the page is indexed.".to_string());
        }
        if !url_analysis.issues.is_empty() {
            recommendations.push(format!("URL issues: {}.", url_analysis.issues.join(", ")));
        }
        recommendations.extend(hreflang.issues.iter().cloned());
        if !schema_markup.has_schema {
            recommendations.push(
                "Add Schema.org structured data to improve how the page appears in search results."
                    .to_string(),
            );
        }
        if !loading_optimization.has_resource_hints {
            recommendations.push(
                "Use resource hints (preload, prefetch) to speed up loading of key assets."
                    .to_string(),
            );
        }
        if !security.is_https {
            recommendations.push(
                "Move the site to HTTPS for better security and SEO.".to_string(),
            );
        }
        if internal_links.orphaned_headings > 0 {
            recommendations.push(
                "Some headings are not used as anchor text anywhere. Add internal links to those sections."
                    .to_string(),
            );
        }

        let mut raw_score = f64::from(loading_optimization.optimization_score) * 0.2
            + f64::from(internal_links.link_score) * 0.1;
        for (passed, weight) in [
            (canonical.has_canonical, 15.0),
            (robots.has_robots_tag, 10.0),
            (url_analysis.issues.is_empty(), 15.0),
            (schema_markup.has_schema, 15.0),
            (security.is_https, 15.0),
        ] {
            if passed {
                raw_score += weight;
            }
        }
        let technical_score = clamp_score(raw_score);

        let mut extra = Extra::new();
        extra.insert("resolved_url".into(), url.as_str().into());

        Ok(TechnicalAnalysis {
            canonical,
            robots,
            url_analysis,
            hreflang,
            schema_markup,
            sitemap,
            loading_optimization,
            security,
            internal_links,
            technical_score,
            recommendations,
            extra,
        })
    }
}

fn check_canonical(doc: &Document, page_url: &str) -> CanonicalInfo {
    match doc.find_links_with_rel("canonical").first() {
        Some(link) => {
            let href = link.attr_or("href", "");
            CanonicalInfo {
                has_canonical: true,
                canonical_url: Some(href.to_string()),
                is_self_canonical: href == page_url,
            }
        }
        None => CanonicalInfo {
            has_canonical: false,
            canonical_url: None,
            is_self_canonical: false,
        },
    }
}

fn check_robots(doc: &Document) -> RobotsInfo {
    let Some(meta) = doc.meta("name", "robots") else {
        return RobotsInfo {
            has_robots_tag: false,
            directives: Vec::new(),
            is_noindex: false,
            is_nofollow: false,
        };
    };

    let directives: Vec<String> = meta
        .attr_or("content", "")
        .split(',')
        .map(|d| d.trim().to_string())
        .collect();
    let has = |name: &str| directives.iter().any(|d| d.eq_ignore_ascii_case(name));

    RobotsInfo {
        has_robots_tag: true,
        is_noindex: has("noindex"),
        is_nofollow: has("nofollow"),
        directives,
    }
}

fn check_hreflang(doc: &Document) -> HreflangInfo {
    let languages: Vec<String> = doc
        .select(&HREFLANG_SELECTOR)
        .iter()
        .filter_map(|link| link.attr("hreflang"))
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
        .collect();

    let mut issues = Vec::new();
    if let Some(page_lang) = doc.html_lang().filter(|lang| !lang.is_empty()) {
        if !languages.is_empty() && !languages.iter().any(|lang| lang == page_lang) {
            issues.push("Missing self-referencing hreflang link.".to_string());
        }
    }

    HreflangInfo {
        has_hreflang: !languages.is_empty(),
        count: languages.len(),
        languages,
        issues,
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
