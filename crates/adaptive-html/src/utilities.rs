//! Utility functions and constants for HTML processing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Block-level HTML elements
pub const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas",
    "center", "dd", "dir", "div", "dl", "dt", "fieldset", "figcaption",
    "figure", "footer", "form", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "html", "isindex", "li", "main", "menu",
    "nav", "noframes", "noscript", "ol", "output", "p", "pre", "section",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Void (self-closing) HTML elements
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements that still produce card output when blank
pub const MEANINGFUL_WHEN_BLANK: &[&str] = &["a", "th", "td", "iframe"];

/// Sentinel emitted for `<br>`; list items re-indent after it
pub const LINE_BREAK: &str = "  \n";

/// Marker separating nesting levels inside a list item's text
pub const NESTED_LIST_MARKER: &str = "\r\t";

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \r\n\t]+").expect("valid regex"));

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Check if a tag is meaningful when blank
pub fn is_meaningful_when_blank(tag: &str) -> bool {
    MEANINGFUL_WHEN_BLANK.contains(&tag.to_lowercase().as_str())
}

/// Check if text consists only of whitespace
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Collapse runs of space, tab, CR and LF into a single space
pub fn collapse_whitespace_run(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Clean an attribute value (trim and handle empty)
pub fn clean_attribute(value: Option<&str>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_block() {
        assert!(is_block("div"));
        assert!(is_block("p"));
        assert!(is_block("DIV"));
        assert!(!is_block("span"));
        assert!(!is_block("a"));
    }

    #[test]
    fn test_meaningful_when_blank() {
        assert!(is_meaningful_when_blank("a"));
        assert!(is_meaningful_when_blank("TD"));
        assert!(is_meaningful_when_blank("iframe"));
        assert!(!is_meaningful_when_blank("p"));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \n\t"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_collapse_whitespace_run() {
        assert_eq!(collapse_whitespace_run("a \n\t b"), "a b");
        assert_eq!(collapse_whitespace_run("\r\n"), " ");
        assert_eq!(collapse_whitespace_run("a\u{a0}b"), "a\u{a0}b");
    }

    #[test]
    fn test_clean_attribute() {
        assert_eq!(clean_attribute(Some("  x.png ")), "x.png");
        assert_eq!(clean_attribute(Some("   ")), "");
        assert_eq!(clean_attribute(None), "");
    }
}
