//! HTML parsing support.
//!
//! This module provides the parser seam used by the service and a
//! `scraper`-backed implementation that converts HTML strings to the
//! CDP-style Node structure.

use crate::node::Node;

/// Parses an HTML string into a Node tree.
///
/// The returned root holds the parsed fragment's nodes as its children.
pub trait HtmlParser: Send + Sync {
    fn parse(&self, html: &str) -> Node;
}

/// HTML parser backed by scraper/html5ever
#[cfg(feature = "html")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperParser;

#[cfg(feature = "html")]
impl HtmlParser for ScraperParser {
    fn parse(&self, html: &str) -> Node {
        parse_html(html)
    }
}

/// Parse an HTML string into a Node tree.
///
/// This is useful when you need to manipulate the DOM tree before
/// converting it to a card.
///
/// # Example
///
/// ```rust
/// use adaptive_html::{parse_html, AdaptiveHtmlService};
///
/// // Parse HTML to a Node tree
/// let node = parse_html("<h1>Hello <em>World</em></h1>");
///
/// // Convert to a card
/// let service = AdaptiveHtmlService::new();
/// let card = service.to_json(&node).unwrap();
/// assert_eq!(card.body.len(), 1);
/// ```
#[cfg(feature = "html")]
pub fn parse_html(html: &str) -> Node {
    let document = scraper::Html::parse_fragment(html);
    scraper_to_node(document.root_element())
}

/// Convert a scraper ElementRef to our Node structure
#[cfg(feature = "html")]
fn scraper_to_node(element: scraper::ElementRef) -> Node {
    use scraper::{ElementRef, Node as ScraperNode};

    let tag = element.value().name();

    // Collect attributes
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();

    let mut node = if attrs.is_empty() {
        Node::element(tag)
    } else {
        Node::element_with_attrs(tag, attrs)
    };

    // Process children
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(&comment.comment));
            }
            _ => {}
        }
    }

    node
}
