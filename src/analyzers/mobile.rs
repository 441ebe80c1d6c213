//! Mobile-friendliness analysis.
//!
//! This module provides:
//! - Viewport configuration checks
//! - Touch target sizing estimates from classes and inline styles
//! - Small font detection
//! - Mobile platform hints (theme color, touch icon, manifest, AMP)
//! - Responsive image and CSS detection
//!
//! Everything here works from the markup alone; no stylesheet is fetched, so
//! sizes are estimated from inline styles and well-known utility classes.

use regex::Regex;
use scraper::Selector;
use serde::Serialize;
use std::sync::LazyLock;

use super::{Analyzer, AnalyzerKind, AnalyzerOutput, Extra, Page};
use crate::document::{AttrMatch, Document, Element};
use crate::error_handling::AnalyzerError;
use crate::utils::text::{clamp_score, percentage, round_to};
use crate::utils::{compile_regex_unsafe, parse_selector_unsafe};

const MIN_TOUCH_TARGET_PX: u32 = 40;
const MIN_FONT_PX: u32 = 12;
/// Share of small targets still considered adequate.
const SMALL_TARGET_TOLERANCE: f64 = 0.1;
const SMALL_TARGET_CLASSES: &[&str] = &["btn-sm", "small"];

static TOUCH_TARGET_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    parse_selector_unsafe(
        "a, button, input[type=button], input[type=submit], input[type=checkbox], input[type=radio]",
        "TOUCH_TARGET_SELECTOR",
    )
});

static WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"width:\s*(\d+)px", "WIDTH_RE"));
static HEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"height:\s*(\d+)px", "HEIGHT_RE"));
static FONT_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"font-size:\s*(\d+)px", "FONT_SIZE_RE"));
static MEDIA_QUERY_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"@media\s+([^{]+)", "MEDIA_QUERY_RE"));

static SMALL_TEXT_CLASS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["small", "text-xs", "text-sm", "fine-print"]
        .iter()
        .map(|pattern| compile_regex_unsafe(pattern, "SMALL_TEXT_CLASS_PATTERNS"))
        .collect()
});

static FRAMEWORK_CLASS_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("bootstrap", r"col-\w+-\d+"),
        ("foundation", r"small-\d+|medium-\d+|large-\d+"),
        ("tailwind", r"sm:|md:|lg:|xl:|2xl:"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, compile_regex_unsafe(pattern, "FRAMEWORK_CLASS_PATTERNS")))
    .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportInfo {
    pub has_viewport: bool,
    pub content: Option<String>,
    pub has_width: bool,
    pub has_initial_scale: bool,
    /// `user-scalable=no` or `maximum-scale=1`.
    pub prevents_zooming: bool,
    pub is_responsive: bool,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TouchTargets {
    pub total_touch_targets: usize,
    pub potential_small_targets: usize,
    pub adequate_sizing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSizes {
    pub small_inline_fonts: usize,
    pub small_class_elements: usize,
    pub potential_issues: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MobileElements {
    pub has_theme_color: bool,
    pub has_apple_icon: bool,
    pub has_web_manifest: bool,
    pub has_amp_version: bool,
    /// 25 per element present.
    pub mobile_optimization_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsiveImages {
    pub total_images: usize,
    pub responsive_images: usize,
    pub has_responsive_images: bool,
    pub responsive_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsiveCss {
    pub has_media_queries: bool,
    pub media_queries_count: usize,
    pub has_responsive_framework: bool,
    pub detected_frameworks: Vec<String>,
}

/// Result of [`MobileAnalyzer`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MobileAnalysis {
    pub viewport: ViewportInfo,
    pub touch_targets: TouchTargets,
    pub font_sizes: FontSizes,
    pub mobile_elements: MobileElements,
    pub responsive_images: ResponsiveImages,
    pub responsive_css: ResponsiveCss,
    pub mobile_score: u8,
    pub recommendations: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl AnalyzerOutput for MobileAnalysis {
    fn score(&self) -> u8 {
        self.mobile_score
    }

    fn recommendations(&self) -> &[String] {
        &self.recommendations
    }
}

/// Estimates how well the page works on small touch screens.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobileAnalyzer;

impl Analyzer for MobileAnalyzer {
    type Output = MobileAnalysis;

    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Mobile
    }

    fn analyze(&self, page: &Page<'_>) -> Result<MobileAnalysis, AnalyzerError> {
        let doc = page.document;

        let viewport = check_viewport(doc);
        let touch_targets = analyze_touch_targets(doc);
        let font_sizes = analyze_font_sizes(doc);
        let mobile_elements = check_mobile_elements(doc);
        let responsive_images = check_responsive_images(doc);
        let responsive_css = check_responsive_css(doc);

        let mut recommendations = Vec::new();
        if !viewport.has_viewport {
            recommendations.push(
                "Add a viewport meta tag so the page renders correctly on mobile devices."
                    .to_string(),
            );
        }
        if !viewport.is_responsive {
            recommendations.push(
                "Configure the viewport for responsive design: width=device-width, initial-scale=1."
                    .to_string(),
            );
        }
        if !touch_targets.adequate_sizing {
            recommendations.push(
                "Increase the size of interactive elements so they are easy to tap on mobile devices."
                    .to_string(),
            );
        }
        if font_sizes.potential_issues {
            recommendations
                .push("Check font sizes for better readability on mobile devices.".to_string());
        }
        if !responsive_images.has_responsive_images && responsive_images.total_images > 0 {
            recommendations.push(
                "Use responsive images (srcset or picture) so mobile devices load suitable sizes."
                    .to_string(),
            );
        }
        if !responsive_css.has_media_queries {
            recommendations.push(
                "Add media queries so the layout adapts to different screen sizes.".to_string(),
            );
        }

        let mut raw_score = 0.0;
        for (passed, weight) in [
            (viewport.is_responsive, 30.0),
            (touch_targets.adequate_sizing, 20.0),
            (!font_sizes.potential_issues, 15.0),
            (responsive_images.has_responsive_images, 15.0),
            (responsive_css.has_media_queries, 20.0),
        ] {
            if passed {
                raw_score += weight;
            }
        }

        Ok(MobileAnalysis {
            viewport,
            touch_targets,
            font_sizes,
            mobile_elements,
            responsive_images,
            responsive_css,
            mobile_score: clamp_score(raw_score),
            recommendations,
            extra: Extra::new(),
        })
    }
}

fn check_viewport(doc: &Document) -> ViewportInfo {
    let Some(meta) = doc.meta("name", "viewport") else {
        return ViewportInfo {
            has_viewport: false,
            content: None,
            has_width: false,
            has_initial_scale: false,
            prevents_zooming: false,
            is_responsive: false,
            issues: Vec::new(),
        };
    };

    let content = meta.attr_or("content", "");
    let has_width = content.contains("width=device-width");
    let has_initial_scale = content.contains("initial-scale=1");
    let is_responsive = has_width && has_initial_scale;

    ViewportInfo {
        has_viewport: true,
        content: Some(content.to_string()),
        has_width,
        has_initial_scale,
        prevents_zooming: content.contains("user-scalable=no")
            || content.contains("maximum-scale=1"),
        is_responsive,
        issues: if is_responsive {
            Vec::new()
        } else {
            vec!["Viewport settings are not optimal".to_string()]
        },
    }
}

/// First `<N>px` captured by `re` in `style`, when below `limit`.
fn inline_px_below(re: &Regex, style: &str, limit: u32) -> bool {
    re.captures(style)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .is_some_and(|px| px < limit)
}

fn is_small_target(element: &Element<'_>) -> bool {
    if SMALL_TARGET_CLASSES.iter().any(|class| element.has_class(class)) {
        return true;
    }
    let style = element.attr_or("style", "");
    inline_px_below(&WIDTH_RE, style, MIN_TOUCH_TARGET_PX)
        || inline_px_below(&HEIGHT_RE, style, MIN_TOUCH_TARGET_PX)
}

fn analyze_touch_targets(doc: &Document) -> TouchTargets {
    let targets = doc.select(&TOUCH_TARGET_SELECTOR);
    let small = targets.iter().filter(|t| is_small_target(t)).count();
    let adequate_sizing =
        small == 0 || (small as f64 / targets.len().max(1) as f64) < SMALL_TARGET_TOLERANCE;

    TouchTargets {
        total_touch_targets: targets.len(),
        potential_small_targets: small,
        adequate_sizing,
    }
}

fn analyze_font_sizes(doc: &Document) -> FontSizes {
    let small_inline_fonts = doc
        .find_by_attr("style", AttrMatch::Contains("font-size"))
        .iter()
        .filter(|element| inline_px_below(&FONT_SIZE_RE, element.attr_or("style", ""), MIN_FONT_PX))
        .count();

    // An element matching several patterns counts once per pattern.
    let small_class_elements = SMALL_TEXT_CLASS_PATTERNS
        .iter()
        .map(|pattern| doc.find_by_class_pattern(pattern).len())
        .sum::<usize>();

    FontSizes {
        small_inline_fonts,
        small_class_elements,
        potential_issues: small_inline_fonts > 0 || small_class_elements > 0,
    }
}

fn check_mobile_elements(doc: &Document) -> MobileElements {
    let has_theme_color = doc.meta("name", "theme-color").is_some();
    let has_apple_icon = !doc.find_links_with_rel("apple-touch-icon").is_empty();
    let has_web_manifest = !doc.find_links_with_rel("manifest").is_empty();
    let has_amp_version = !doc.find_links_with_rel("amphtml").is_empty();

    let present = [has_theme_color, has_apple_icon, has_web_manifest, has_amp_version]
        .iter()
        .filter(|present| **present)
        .count();

    MobileElements {
        has_theme_color,
        has_apple_icon,
        has_web_manifest,
        has_amp_version,
        mobile_optimization_score: (present * 25) as u8,
    }
}

/// Text of every inline `<style>` block.
fn style_blocks(doc: &Document) -> Vec<String> {
    doc.find_all("style")
        .iter()
        .map(|style| style.raw_text())
        .filter(|css| !css.is_empty())
        .collect()
}

fn check_responsive_images(doc: &Document) -> ResponsiveImages {
    let images = doc.find_all("img");
    let responsive = images
        .iter()
        .filter(|img| {
            img.has_attr("srcset")
                || img.has_attr("sizes")
                || img.parent_tag_name() == Some("picture")
        })
        .count();
    let has_responsive_background = style_blocks(doc)
        .iter()
        .any(|css| css.contains("@media") && css.contains("background"));

    ResponsiveImages {
        total_images: images.len(),
        responsive_images: responsive,
        has_responsive_images: responsive > 0 || has_responsive_background,
        responsive_percentage: round_to(percentage(responsive, images.len().max(1)), 1),
    }
}

fn check_responsive_css(doc: &Document) -> ResponsiveCss {
    let media_queries_count: usize = style_blocks(doc)
        .iter()
        .map(|css| MEDIA_QUERY_RE.find_iter(css).count())
        .sum();

    let detected_frameworks: Vec<String> = FRAMEWORK_CLASS_PATTERNS
        .iter()
        .filter(|(_, pattern)| !doc.find_by_class_pattern(pattern).is_empty())
        .map(|(name, _)| name.to_string())
        .collect();
    let has_responsive_framework = !detected_frameworks.is_empty();

    ResponsiveCss {
        has_media_queries: media_queries_count > 0 || has_responsive_framework,
        media_queries_count,
        has_responsive_framework,
        detected_frameworks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(html: &str) -> MobileAnalysis {
        let doc = Document::parse(html);
        MobileAnalyzer
            .analyze(&Page::new("https://example.com/", &doc))
            .expect("mobile analysis never fails")
    }

    const RESPONSIVE_VIEWPORT: &str =
        r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#;

    #[test]
    fn test_responsive_viewport_scores_thirty() {
        let result = analyze(RESPONSIVE_VIEWPORT);
        assert!(result.viewport.is_responsive);
        assert!(!result.viewport.prevents_zooming);
        assert!(result.viewport.issues.is_empty());
        // viewport 30 + touch 20 + fonts 15, no images or media queries
        assert_eq!(result.mobile_score, 65);
    }

    #[test]
    fn test_missing_viewport() {
        let result = analyze("<p>plain</p>");
        assert!(!result.viewport.has_viewport);
        assert_eq!(result.viewport.content, None);
        assert_eq!(
            result.recommendations[..2],
            [
                "Add a viewport meta tag so the page renders correctly on mobile devices.",
                "Configure the viewport for responsive design: width=device-width, initial-scale=1.",
            ]
        );
    }

    #[test]
    fn test_viewport_prevents_zooming() {
        let result = analyze(
            r#"<meta name="viewport" content="width=device-width, maximum-scale=1">"#,
        );
        assert!(result.viewport.has_width);
        assert!(!result.viewport.has_initial_scale);
        assert!(result.viewport.prevents_zooming);
        assert_eq!(result.viewport.issues.len(), 1);
    }

    #[test]
    fn test_small_touch_targets() {
        let result = analyze(
            r#"<a href="/a" class="btn btn-sm">A</a>
            <button style="height: 20px">B</button>
            <input type="submit" style="width:60px">
            <input type="text">
            <a href="/b">C</a>"#,
        );
        assert_eq!(result.touch_targets.total_touch_targets, 4);
        assert_eq!(result.touch_targets.potential_small_targets, 2);
        assert!(!result.touch_targets.adequate_sizing);
    }

    #[test]
    fn test_one_small_target_among_many_is_adequate() {
        let mut html = String::from(r#"<a class="small" href="/x">x</a>"#);
        for i in 0..10 {
            html.push_str(&format!(r#"<a href="/{i}">link</a>"#));
        }
        let result = analyze(&html);
        assert_eq!(result.touch_targets.potential_small_targets, 1);
        assert!(result.touch_targets.adequate_sizing);
    }

    #[test]
    fn test_font_size_checks() {
        let result = analyze(
            r#"<p style="font-size: 10px">tiny</p>
            <p style="font-size:14px">fine</p>
            <span class="text-sm">note</span>"#,
        );
        assert_eq!(result.font_sizes.small_inline_fonts, 1);
        assert_eq!(result.font_sizes.small_class_elements, 1);
        assert!(result.font_sizes.potential_issues);
    }

    #[test]
    fn test_mobile_elements_score() {
        let result = analyze(
            r##"<meta name="theme-color" content="#fff">
            <link rel="manifest" href="/site.webmanifest">"##,
        );
        assert!(result.mobile_elements.has_theme_color);
        assert!(result.mobile_elements.has_web_manifest);
        assert!(!result.mobile_elements.has_apple_icon);
        assert_eq!(result.mobile_elements.mobile_optimization_score, 50);
    }

    #[test]
    fn test_responsive_images() {
        let result = analyze(
            r#"<img src="a.png" srcset="a-2x.png 2x">
            <picture><img src="b.png"></picture>
            <img src="c.png">"#,
        );
        assert_eq!(result.responsive_images.total_images, 3);
        assert_eq!(result.responsive_images.responsive_images, 2);
        assert!(result.responsive_images.has_responsive_images);
        assert_eq!(result.responsive_images.responsive_percentage, 66.7);
    }

    #[test]
    fn test_images_recommendation_only_with_images() {
        let without = analyze(RESPONSIVE_VIEWPORT);
        assert!(!without.recommendations.iter().any(|r| r.contains("srcset")));

        let with = analyze(r#"<img src="a.png" alt="a">"#);
        assert!(with.recommendations.iter().any(|r| r.contains("srcset")));
    }

    #[test]
    fn test_media_queries_and_frameworks() {
        let result = analyze(
            r#"<style>
            @media (max-width: 600px) { body { background: red; } }
            @media print { nav { display: none; } }
            </style>
            <div class="col-md-6"></div>
            <div class="md:flex"></div>"#,
        );
        assert_eq!(result.responsive_css.media_queries_count, 2);
        assert_eq!(
            result.responsive_css.detected_frameworks,
            vec!["bootstrap", "tailwind"]
        );
        assert!(result.responsive_css.has_media_queries);
        // A background inside @media counts as a responsive image technique.
        assert!(result.responsive_images.has_responsive_images);
    }

    #[test]
    fn test_full_score() {
        let result = analyze(&format!(
            r#"{RESPONSIVE_VIEWPORT}
            <style>@media (min-width: 800px) {{ main {{ width: 80%; }} }}</style>
            <img src="a.png" sizes="100vw" srcset="a.png 800w">"#
        ));
        assert_eq!(result.mobile_score, 100);
        assert!(result.recommendations.is_empty());
    }
}
