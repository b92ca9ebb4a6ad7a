//! Whitespace normalization for DOM trees.
//!
//! Collapses redundant whitespace across a tree before conversion, the way a
//! browser would when laying out the content:
//!
//! - runs of space, tab, CR and LF inside text collapse to one space
//! - a leading space is dropped after a space, after a block or `<br>`
//!   boundary, and at the start of the tree
//! - a trailing space is dropped before a block or `<br>` boundary and at the
//!   end of the tree
//! - void elements such as `<img>` keep the whitespace around them
//! - text nodes left empty, comments and other non-content nodes are removed
//!
//! Preformatted elements are skipped entirely.

use crate::node::Node;
use crate::options::AdaptiveHtmlOptions;
use crate::utilities::{collapse_whitespace_run, is_block};

/// Collapse whitespace in place across the descendants of `root`.
///
/// The root itself is never removed.
pub fn collapse_whitespace(root: &mut Node, options: &AdaptiveHtmlOptions) {
    if root.children().next().is_none() || options.is_preformatted(&root.tag_name()) {
        return;
    }

    // First pass computes every text in document order, second pass writes
    // them back. A boundary may trim a text node seen earlier in another
    // subtree, so the results can't be applied while walking.
    let mut collapser = Collapser {
        options,
        texts: Vec::new(),
        prev_text: None,
        prev_void: false,
    };
    collapser.visit_children(root);
    collapser.trim_prev_text();

    let mut texts = collapser.texts.into_iter();
    apply(root, &mut texts, options);
}

struct Collapser<'a> {
    options: &'a AdaptiveHtmlOptions,
    texts: Vec<String>,
    /// Index of the last non-empty text
    prev_text: Option<usize>,
    /// Whether a non-block void element was seen since the last boundary
    prev_void: bool,
}

impl Collapser<'_> {
    fn visit_children(&mut self, parent: &Node) {
        for child in parent.children() {
            if child.is_character_data() {
                self.visit_text(child.node_value.as_deref().unwrap_or(""));
            } else if child.is_element() {
                self.visit_element(child);

                let descend = child.children().next().is_some()
                    && !self.options.is_preformatted(&child.tag_name());
                if descend {
                    self.visit_children(child);
                    // Elements are boundaries both on entry and on exit
                    self.visit_element(child);
                }
            }
        }
    }

    fn visit_text(&mut self, data: &str) {
        let mut text = collapse_whitespace_run(data);

        let after_space = self
            .prev_text
            .map_or(true, |index| self.texts[index].ends_with(' '));
        if after_space && !self.prev_void && text.starts_with(' ') {
            text.remove(0);
        }

        if !text.is_empty() {
            self.prev_text = Some(self.texts.len());
        }
        self.texts.push(text);
    }

    fn visit_element(&mut self, element: &Node) {
        let tag = element.tag_name();
        if is_block(&tag) || tag == "br" {
            self.trim_prev_text();
            self.prev_text = None;
            self.prev_void = false;
        } else if self.options.is_void(&tag) {
            self.prev_text = None;
            self.prev_void = true;
        }
    }

    fn trim_prev_text(&mut self) {
        if let Some(index) = self.prev_text {
            let text = &mut self.texts[index];
            if text.ends_with(' ') {
                text.pop();
            }
        }
    }
}

fn apply<I>(parent: &mut Node, texts: &mut I, options: &AdaptiveHtmlOptions)
where
    I: Iterator<Item = String>,
{
    let Some(children) = parent.children.as_mut() else {
        return;
    };

    let mut kept = Vec::with_capacity(children.len());
    for mut child in std::mem::take(children) {
        if child.is_character_data() {
            let text = texts.next().unwrap_or_default();
            if !text.is_empty() {
                child.node_value = Some(text);
                kept.push(child);
            }
        } else if child.is_element() {
            if !options.is_preformatted(&child.tag_name()) {
                apply(&mut child, texts, options);
            }
            kept.push(child);
        }
    }
    *children = kept;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collapse(mut root: Node) -> Node {
        collapse_whitespace(&mut root, &AdaptiveHtmlOptions::default());
        root
    }

    fn texts(node: &Node) -> Vec<String> {
        let mut out = Vec::new();
        for child in node.children() {
            if child.is_character_data() {
                out.push(child.node_value.clone().unwrap_or_default());
            } else {
                out.extend(texts(child));
            }
        }
        out
    }

    fn element(tag: &str, children: Vec<Node>) -> Node {
        let mut node = Node::element(tag);
        for child in children {
            node.add_child(child);
        }
        node
    }

    #[test]
    fn test_collapses_interior_runs() {
        let root = collapse(element("div", vec![Node::text("  Hello \n\t  World  ")]));
        assert_eq!(texts(&root), vec!["Hello World"]);
    }

    #[test]
    fn test_strips_space_after_space() {
        let root = collapse(element(
            "div",
            vec![
                Node::text("Hello "),
                element("em", vec![Node::text(" World")]),
            ],
        ));
        assert_eq!(texts(&root), vec!["Hello ", "World"]);
    }

    #[test]
    fn test_block_boundaries_trim_both_sides() {
        let root = collapse(element(
            "div",
            vec![
                Node::text("before "),
                element("p", vec![Node::text(" inside ")]),
                Node::text(" after"),
            ],
        ));
        assert_eq!(texts(&root), vec!["before", "inside", "after"]);
    }

    #[test]
    fn test_line_break_is_boundary() {
        let root = collapse(element(
            "p",
            vec![Node::text("one "), Node::element("br"), Node::text(" two")],
        ));
        assert_eq!(texts(&root), vec!["one", "two"]);
    }

    #[test]
    fn test_void_elements_keep_whitespace() {
        let root = collapse(element(
            "li",
            vec![
                Node::text("\n List item 1\n "),
                Node::element("img"),
                Node::text("\n item 1 continues\n "),
            ],
        ));
        assert_eq!(texts(&root), vec!["List item 1 ", " item 1 continues"]);
    }

    #[test]
    fn test_removes_empty_text_and_comments() {
        let root = collapse(element(
            "div",
            vec![
                Node::text("   "),
                element("p", vec![Node::text(" ")]),
                Node::comment("note"),
                Node::text("\n"),
            ],
        ));
        assert_eq!(root.children().count(), 1);
        let p = root.children().next().unwrap();
        assert_eq!(p.tag_name(), "p");
        assert_eq!(p.children().count(), 0);
    }

    #[test]
    fn test_trailing_space_removed_at_end() {
        let root = collapse(element(
            "div",
            vec![Node::text("text "), element("span", vec![Node::text(" ")])],
        ));
        assert_eq!(texts(&root), vec!["text"]);
    }

    #[test]
    fn test_preformatted_untouched() {
        let root = collapse(element(
            "div",
            vec![
                Node::text("a  b"),
                element("pre", vec![Node::text("  keep\n   this  ")]),
            ],
        ));
        assert_eq!(texts(&root), vec!["a b", "  keep\n   this  "]);
    }
}
