//! AdaptiveHtmlService - the main entry point for HTML to Adaptive Card conversion.

use adaptive_html_core::{AdaptiveCard, CardElement, TextBlock};
use log::{debug, trace};
use once_cell::sync::{Lazy, OnceCell};

#[cfg(feature = "html")]
use crate::html::ScraperParser;
use crate::html::HtmlParser;
use crate::node::{Node, NodeRef};
use crate::options::AdaptiveHtmlOptions;
use crate::rules::{Filter, Replacement, Rule, Rules};
use crate::whitespace::collapse_whitespace;
use crate::{AdaptiveHtmlError, Result};

static DEFAULT_SERVICE: Lazy<AdaptiveHtmlService> = Lazy::new(AdaptiveHtmlService::new);

/// Input accepted by the converter: an HTML string or an existing DOM node
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    /// Raw HTML, parsed as a fragment
    Html(&'a str),
    /// An element, document or document fragment node
    Node(&'a Node),
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(html: &'a str) -> Self {
        Input::Html(html)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(html: &'a String) -> Self {
        Input::Html(html)
    }
}

impl<'a> From<&'a Node> for Input<'a> {
    fn from(node: &'a Node) -> Self {
        Input::Node(node)
    }
}

/// The main service for converting HTML to Adaptive Cards
pub struct AdaptiveHtmlService {
    options: AdaptiveHtmlOptions,
    rules: Rules,
    parser: OnceCell<Box<dyn HtmlParser>>,
}

impl AdaptiveHtmlService {
    /// Create a new AdaptiveHtmlService with default options
    pub fn new() -> Self {
        Self::with_options(AdaptiveHtmlOptions::default())
    }

    /// Create an AdaptiveHtmlService with custom options
    pub fn with_options(options: AdaptiveHtmlOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
            parser: OnceCell::new(),
        }
    }

    /// Use `parser` for string input instead of the built-in one
    pub fn with_parser<P>(mut self, parser: P) -> Self
    where
        P: HtmlParser + 'static,
    {
        self.parser = OnceCell::with_value(Box::new(parser));
        self
    }

    /// Convert HTML or a DOM node to an Adaptive Card.
    ///
    /// A node is cloned before whitespace normalization, so the caller's
    /// tree is never modified.
    pub fn to_json<'a>(&self, input: impl Into<Input<'a>>) -> Result<AdaptiveCard> {
        let input = input.into();
        let mut root = self.root_node(input)?;
        collapse_whitespace(&mut root, &self.options);

        let card = AdaptiveCard::from_elements(self.process(&root));
        debug!(
            "Converted {} into a card with {} body elements",
            match input {
                Input::Html(_) => "HTML string",
                Input::Node(_) => "DOM node",
            },
            card.body.len()
        );

        Ok(card)
    }

    /// Convert HTML or a DOM node to Adaptive Card JSON text
    pub fn to_json_string<'a>(&self, input: impl Into<Input<'a>>) -> Result<String> {
        let card = self.to_json(input)?;
        Ok(serde_json::to_string(&card)?)
    }

    /// Add a custom rule
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Remove elements matching the filter
    pub fn remove(&mut self, filter: Filter) -> &mut Self {
        self.rules.remove(filter);
        self
    }

    /// Apply a plugin
    pub fn use_plugin<F>(&mut self, plugin: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        plugin(self);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &AdaptiveHtmlOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut AdaptiveHtmlOptions {
        &mut self.options
    }

    fn root_node(&self, input: Input) -> Result<Node> {
        match input {
            Input::Html(html) => Ok(self.parser()?.parse(html)),
            Input::Node(node) if node.is_container_kind() => Ok(node.clone()),
            Input::Node(node) => Err(AdaptiveHtmlError::InvalidInput(format!(
                "{} is not a string, or an element/document/fragment node.",
                node.node_name
            ))),
        }
    }

    #[cfg(feature = "html")]
    fn parser(&self) -> Result<&dyn HtmlParser> {
        let parser = self
            .parser
            .get_or_init(|| Box::new(ScraperParser) as Box<dyn HtmlParser>);
        Ok(parser.as_ref())
    }

    #[cfg(not(feature = "html"))]
    fn parser(&self) -> Result<&dyn HtmlParser> {
        self.parser.get().map(|parser| parser.as_ref()).ok_or_else(|| {
            AdaptiveHtmlError::ConversionError(
                "no HTML parser available; enable the `html` feature or use `with_parser`"
                    .to_string(),
            )
        })
    }

    /// Convert the children of `parent`, merging adjacent inline text
    fn process(&self, parent: &Node) -> Vec<CardElement> {
        let mut output = Output::default();

        for child in parent.children() {
            if !child.is_element() && !child.is_character_data() {
                continue;
            }

            match self.replacement_for_node(child) {
                Replacement::Text { text, non_text } => {
                    output.text.push_str(&text);
                    if !non_text.is_empty() {
                        output.flush();
                        output.elements.extend(non_text);
                    }
                }
                Replacement::Element(element) => output.push(element),
                Replacement::Elements(elements) => {
                    output.flush();
                    output.elements.extend(elements);
                }
            }
        }

        output.finish()
    }

    /// Convert a single node: children first, then the node's own rule
    fn replacement_for_node(&self, node: &Node) -> Replacement {
        let node_ref = NodeRef::new(node);
        let rule = self.rules.for_node(&node_ref, &self.options);
        let content = self.process(node);
        trace!("<{}> with {} child elements", node_ref.tag_name(), content.len());
        rule.replace(content, &node_ref, &self.options)
    }
}

impl Default for AdaptiveHtmlService {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert HTML or a DOM node to an Adaptive Card with the default options.
///
/// The underlying service, and its parser, is created once and shared.
pub fn to_json<'a>(input: impl Into<Input<'a>>) -> Result<AdaptiveCard> {
    DEFAULT_SERVICE.to_json(input)
}

/// Elements produced for one parent, plus the inline text not yet flushed
#[derive(Default)]
struct Output {
    elements: Vec<CardElement>,
    text: String,
}

impl Output {
    fn flush(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.elements.push(TextBlock::new(text).into());
        }
    }

    fn push(&mut self, element: CardElement) {
        self.flush();
        self.elements.push(element);
    }

    fn finish(mut self) -> Vec<CardElement> {
        self.flush();
        self.elements
    }
}
