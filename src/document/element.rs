//! Read-only element view.

use scraper::{ElementRef, Node};

use super::text::{joined_text, stripped_text, text_nodes, NON_TEXT_TAGS};

/// A borrowed, read-only view of one element in a [`Document`](super::Document).
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    inner: ElementRef<'a>,
}

impl<'a> Element<'a> {
    pub(crate) fn new(inner: ElementRef<'a>) -> Self {
        Self { inner }
    }

    /// Lowercase tag name.
    pub fn tag_name(&self) -> &'a str {
        self.inner.value().name()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.inner.value().attr(name)
    }

    /// Attribute value, or `default` when the attribute is absent.
    pub fn attr_or(&self, name: &str, default: &'a str) -> &'a str {
        self.attr(name).unwrap_or(default)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Whitespace-separated tokens of the `class` attribute.
    pub fn classes(&self) -> Vec<&'a str> {
        self.attr("class")
            .map(|value| value.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    /// Whitespace-separated tokens of the `rel` attribute, lowercased.
    pub fn rel_tokens(&self) -> Vec<String> {
        self.attr("rel")
            .map(|value| value.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default()
    }

    /// Text of direct text children only.
    pub fn own_text(&self) -> String {
        self.inner
            .children()
            .filter_map(|child| match child.value() {
                Node::Text(text) => Some(&**text),
                _ => None,
            })
            .collect()
    }

    /// All descendant text, whitespace-normalized and single-space separated.
    pub fn text(&self) -> String {
        joined_text(&text_nodes(self.inner, NON_TEXT_TAGS))
    }

    /// Each descendant text node trimmed, then concatenated without separators.
    pub fn stripped_text(&self) -> String {
        stripped_text(&text_nodes(self.inner, NON_TEXT_TAGS))
    }

    /// Descendant text exactly as written, including script and style bodies.
    pub fn raw_text(&self) -> String {
        self.inner.text().collect()
    }

    pub fn parent_tag_name(&self) -> Option<&'a str> {
        self.inner
            .parent()
            .and_then(|parent| parent.value().as_element())
            .map(|element| element.name())
    }
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id() == other.inner.id()
    }
}

impl Eq for Element<'_> {}
