//! Parsed HTML document model.
//!
//! A [`Document`] wraps one `scraper::Html` tree for the duration of a single
//! analysis run. It only exposes queries: analyzers can look things up but can
//! never change the tree, so every analyzer sees the same page regardless of the
//! order they run in.
//!
//! Parsing never fails. html5ever repairs malformed markup into a best-effort
//! tree the same way a browser would.

mod element;
mod text;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::utils::parse_selector_with_fallback;

pub use element::Element;

/// How an attribute value is matched by [`Document::find_by_attr`].
#[derive(Debug, Clone, Copy)]
pub enum AttrMatch<'p> {
    /// Attribute is present, whatever its value.
    Present,
    /// Attribute value equals the string exactly.
    Exact(&'p str),
    /// Attribute value contains the string.
    Contains(&'p str),
    /// Attribute value matches the pattern.
    Regex(&'p Regex),
}

impl AttrMatch<'_> {
    fn matches(&self, value: &str) -> bool {
        match self {
            AttrMatch::Present => true,
            AttrMatch::Exact(expected) => value == *expected,
            AttrMatch::Contains(needle) => value.contains(needle),
            AttrMatch::Regex(pattern) => pattern.is_match(value),
        }
    }
}

/// An immutable, queryable HTML page.
pub struct Document {
    html: Html,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.elements().count())
            .finish()
    }
}

impl Document {
    /// Parses raw HTML. Malformed input degrades to whatever html5ever recovers.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// The root `<html>` element (always synthesized by the parser).
    pub fn root(&self) -> Element<'_> {
        Element::new(self.html.root_element())
    }

    /// Every element in document order, starting with the root.
    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
    }

    /// Elements matching a pre-compiled selector.
    pub fn select<'a>(&'a self, selector: &Selector) -> Vec<Element<'a>> {
        self.html.select(selector).map(Element::new).collect()
    }

    /// Elements matching a CSS selector string. An invalid selector is logged
    /// and matches nothing.
    pub fn select_css(&self, css: &str) -> Vec<Element<'_>> {
        let selector = parse_selector_with_fallback(css, "document query");
        self.select(&selector)
    }

    /// First element with the given tag name.
    pub fn find_first(&self, tag: &str) -> Option<Element<'_>> {
        self.elements()
            .find(|element| element.value().name() == tag)
            .map(Element::new)
    }

    /// All elements with the given tag name.
    pub fn find_all(&self, tag: &str) -> Vec<Element<'_>> {
        self.find_all_of(&[tag])
    }

    /// All elements whose tag name is one of `tags`, in document order.
    pub fn find_all_of(&self, tags: &[&str]) -> Vec<Element<'_>> {
        self.elements()
            .filter(|element| tags.contains(&element.value().name()))
            .map(Element::new)
            .collect()
    }

    pub fn count(&self, tag: &str) -> usize {
        self.elements()
            .filter(|element| element.value().name() == tag)
            .count()
    }

    /// All elements carrying attribute `name` whose value satisfies `matcher`.
    pub fn find_by_attr(&self, name: &str, matcher: AttrMatch<'_>) -> Vec<Element<'_>> {
        self.elements()
            .filter(|element| {
                element
                    .value()
                    .attr(name)
                    .is_some_and(|value| matcher.matches(value))
            })
            .map(Element::new)
            .collect()
    }

    /// Same as [`find_by_attr`](Self::find_by_attr), restricted to one tag name.
    pub fn find_tag_by_attr(
        &self,
        tag: &str,
        name: &str,
        matcher: AttrMatch<'_>,
    ) -> Vec<Element<'_>> {
        self.find_by_attr(name, matcher)
            .into_iter()
            .filter(|element| element.tag_name() == tag)
            .collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Element<'_>> {
        self.elements()
            .find(|element| element.value().id() == Some(id))
            .map(Element::new)
    }

    /// First element with `class` among its class tokens.
    pub fn find_by_class(&self, class: &str) -> Option<Element<'_>> {
        self.elements()
            .map(Element::new)
            .find(|element| element.has_class(class))
    }

    /// Elements with at least one class token matching `pattern`.
    pub fn find_by_class_pattern(&self, pattern: &Regex) -> Vec<Element<'_>> {
        self.elements()
            .map(Element::new)
            .filter(|element| element.classes().iter().any(|class| pattern.is_match(class)))
            .collect()
    }

    /// `<link>` elements whose `rel` token list contains `rel` (case-insensitive).
    pub fn find_links_with_rel(&self, rel: &str) -> Vec<Element<'_>> {
        let rel = rel.to_lowercase();
        self.find_all("link")
            .into_iter()
            .filter(|link| link.rel_tokens().contains(&rel))
            .collect()
    }

    /// First `<meta>` whose `attr` attribute equals `value`.
    pub fn meta(&self, attr: &str, value: &str) -> Option<Element<'_>> {
        self.find_tag_by_attr("meta", attr, AttrMatch::Exact(value))
            .into_iter()
            .next()
    }

    /// `content` of the first `<meta>` whose `attr` attribute equals `value`.
    pub fn meta_content(&self, attr: &str, value: &str) -> Option<&str> {
        self.meta(attr, value).and_then(|meta| meta.attr("content"))
    }

    /// `lang` attribute of the root `<html>` element.
    pub fn html_lang(&self) -> Option<&str> {
        self.html.root_element().value().attr("lang")
    }

    /// Trimmed text of the first `<title>`, if any.
    pub fn title(&self) -> Option<String> {
        self.find_first("title")
            .map(|title| title.raw_text().trim().to_string())
    }

    /// Whole-page text, whitespace-normalized.
    pub fn text(&self) -> String {
        self.root().text()
    }

    /// Page text a visitor would read: scripts, styles, embedded frames and
    /// page chrome (`header`, `footer`, `nav`) are left out.
    pub fn visible_text(&self) -> String {
        let nodes = text::text_nodes(self.html.root_element(), text::HIDDEN_TAGS);
        text::joined_text(&nodes)
    }
}
