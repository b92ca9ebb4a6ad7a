//! Rule and Filter types for HTML conversion.

use adaptive_html_core::{non_text_blocks, text_blocks_as_string, CardElement};

use crate::node::NodeRef;
use crate::options::AdaptiveHtmlOptions;

/// The conversion result of a single DOM node
#[derive(Debug, Clone, PartialEq)]
pub enum Replacement {
    /// Inline text to merge with neighbouring inline content, plus elements
    /// that must be emitted right after it
    Text {
        text: String,
        non_text: Vec<CardElement>,
    },
    /// A single structured element
    Element(CardElement),
    /// A sequence of structured elements
    Elements(Vec<CardElement>),
}

impl Replacement {
    /// Inline text with nothing to emit alongside it
    pub fn text(text: impl Into<String>) -> Self {
        Replacement::Text {
            text: text.into(),
            non_text: Vec::new(),
        }
    }

    /// A replacement that contributes nothing
    pub fn empty() -> Self {
        Replacement::Elements(Vec::new())
    }

    /// Reduce child content to inline text and pass it through `text_fn`.
    ///
    /// Text blocks are joined into one string; every other element is carried
    /// along as non-text.
    pub fn text_effect<F>(content: Vec<CardElement>, text_fn: F) -> Self
    where
        F: FnOnce(String) -> String,
    {
        let text = text_fn(text_blocks_as_string(&content));
        Replacement::Text {
            text,
            non_text: non_text_blocks(content),
        }
    }
}

impl From<CardElement> for Replacement {
    fn from(element: CardElement) -> Self {
        Replacement::Element(element)
    }
}

impl From<Vec<CardElement>> for Replacement {
    fn from(elements: Vec<CardElement>) -> Self {
        Replacement::Elements(elements)
    }
}

/// Type alias for replacement functions
pub type ReplacementFn =
    Box<dyn Fn(Vec<CardElement>, &NodeRef, &AdaptiveHtmlOptions) -> Replacement + Send + Sync>;

/// Type alias for filter predicates
pub type PredicateFn = Box<dyn Fn(&str, &NodeRef, &AdaptiveHtmlOptions) -> bool + Send + Sync>;

/// A filter determines which nodes a rule applies to
pub enum Filter {
    /// Match a single tag name
    TagName(String),
    /// Match any of multiple tag names
    TagNames(Vec<String>),
    /// Match using a predicate function
    Predicate(PredicateFn),
}

impl Filter {
    /// Create a filter for a single tag
    pub fn tag(name: &str) -> Self {
        Filter::TagName(name.to_lowercase())
    }

    /// Create a filter for multiple tags
    pub fn tags(names: &[&str]) -> Self {
        Filter::TagNames(names.iter().map(|s| s.to_lowercase()).collect())
    }

    /// Create a filter with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str, &NodeRef, &AdaptiveHtmlOptions) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// A filter that matches every node
    pub fn any() -> Self {
        Filter::predicate(|_, _, _| true)
    }

    /// Check if this filter matches a node
    pub fn matches(&self, tag: &str, node: &NodeRef, options: &AdaptiveHtmlOptions) -> bool {
        let tag_lower = tag.to_lowercase();
        match self {
            Filter::TagName(t) => tag_lower == *t,
            Filter::TagNames(tags) => tags.contains(&tag_lower),
            Filter::Predicate(f) => f(&tag_lower, node, options),
        }
    }
}

/// A rule defines how to convert a matched DOM node to card content
pub struct Rule {
    /// Filter to determine which nodes this rule applies to
    pub filter: Filter,
    /// Replacement function that builds the node's card content
    pub replacement: ReplacementFn,
}

impl Rule {
    /// Create a new rule
    pub fn new<F>(filter: Filter, replacement: F) -> Self
    where
        F: Fn(Vec<CardElement>, &NodeRef, &AdaptiveHtmlOptions) -> Replacement + Send + Sync + 'static,
    {
        Self {
            filter,
            replacement: Box::new(replacement),
        }
    }

    /// Create a rule that matches a single tag
    pub fn for_tag<F>(tag: &str, replacement: F) -> Self
    where
        F: Fn(Vec<CardElement>, &NodeRef, &AdaptiveHtmlOptions) -> Replacement + Send + Sync + 'static,
    {
        Self::new(Filter::tag(tag), replacement)
    }

    /// Create a rule that matches multiple tags
    pub fn for_tags<F>(tags: &[&str], replacement: F) -> Self
    where
        F: Fn(Vec<CardElement>, &NodeRef, &AdaptiveHtmlOptions) -> Replacement + Send + Sync + 'static,
    {
        Self::new(Filter::tags(tags), replacement)
    }

    /// Apply this rule's replacement
    pub fn replace(
        &self,
        content: Vec<CardElement>,
        node: &NodeRef,
        options: &AdaptiveHtmlOptions,
    ) -> Replacement {
        (self.replacement)(content, node, options)
    }
}
