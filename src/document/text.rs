//! Text collection over the parsed tree.

use scraper::{ElementRef, Node};

/// Subtrees that never contribute to an element's text.
pub(crate) const NON_TEXT_TAGS: &[&str] = &["script", "style", "template"];

/// Subtrees removed before computing what a visitor would actually read.
pub(crate) const HIDDEN_TAGS: &[&str] = &[
    "script", "style", "template", "noscript", "iframe", "header", "footer", "nav",
];

/// Collects every text node below `root` in document order, skipping the
/// subtrees of elements named in `skip`.
///
/// The walk is iterative so deeply nested markup cannot overflow the stack.
pub(crate) fn text_nodes<'a>(root: ElementRef<'a>, skip: &[&str]) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut stack: Vec<_> = root.children().collect();
    stack.reverse();

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => out.push(&**text),
            Node::Element(element) => {
                if skip.contains(&element.name()) {
                    continue;
                }
                let mut children: Vec<_> = node.children().collect();
                children.reverse();
                stack.extend(children);
            }
            _ => {}
        }
    }
    out
}

/// Joins trimmed, non-empty text nodes with single spaces and collapses inner whitespace.
pub(crate) fn joined_text(nodes: &[&str]) -> String {
    let mut out = String::new();
    for word in nodes.iter().flat_map(|node| node.split_whitespace()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Concatenates trimmed text nodes with no separator.
pub(crate) fn stripped_text(nodes: &[&str]) -> String {
    nodes.iter().map(|node| node.trim()).collect()
}
