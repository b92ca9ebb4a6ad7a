//! # adaptive-html
//!
//! Convert HTML and DOM nodes to [Adaptive Card](https://adaptivecards.io) JSON.
//!
//! Conversion runs in three steps:
//!
//! 1. The input is parsed (or cloned, for node input) into an owned
//!    CDP-style [`Node`] tree and its whitespace is collapsed the way a
//!    browser would lay it out.
//! 2. The tree is walked bottom-up. Each node is matched against an ordered
//!    set of [`Rule`]s and turned into a [`Replacement`]; adjacent inline
//!    text is merged into a single `TextBlock`.
//! 3. The top-level elements are assembled into an [`AdaptiveCard`].
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use adaptive_html::{AdaptiveHtmlService, TextBlock};
//!
//! let service = AdaptiveHtmlService::new();
//! let card = service.to_json("<p>Some <em>emphasized</em> text</p>").unwrap();
//! assert_eq!(card.body, vec![TextBlock::new("Some _emphasized_ text").into()]);
//! ```
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use adaptive_html::{to_json, CardElement, Node};
//!
//! let mut h1 = Node::element("h1");
//! h1.add_child(Node::text("Hello World"));
//!
//! let card = to_json(&h1).unwrap();
//! let CardElement::TextBlock(heading) = &card.body[0] else { panic!() };
//! assert_eq!(heading.text, "Hello World");
//! ```
//!
//! ## Custom rules
//!
//! ```rust
//! use adaptive_html::{AdaptiveHtmlService, Replacement, Rule};
//!
//! let mut service = AdaptiveHtmlService::new();
//! service.add_rule(
//!     "strikethrough",
//!     Rule::for_tags(&["del", "s"], |content, _, _| {
//!         Replacement::text_effect(content, |text| format!("~~{}~~", text))
//!     }),
//! );
//!
//! let json = service.to_json_string("<p><del>gone</del></p>").unwrap();
//! assert!(json.contains("~~gone~~"));
//! ```

pub mod html;
pub mod node;
mod options;
mod rules;
mod service;
mod utilities;
mod whitespace;

#[cfg(feature = "html")]
pub use html::{parse_html, ScraperParser};
pub use html::HtmlParser;
pub use node::{Node, NodeRef, NodeType};
pub use options::AdaptiveHtmlOptions;
pub use rules::{Filter, PredicateFn, Replacement, ReplacementFn, Rule, Rules};
pub use service::{to_json, AdaptiveHtmlService, Input};
pub use utilities::*;
pub use whitespace::collapse_whitespace;

pub use adaptive_html_core::{
    parse_card, wrap, unwrap, AdaptiveCard, CardElement, CardError, Column, ColumnSet, Container,
    ContainerStyle, FontType, Image, RichTextBlock, TextBlock, TextBlockStyle, TextRun, TextSize,
    TextWeight, CARD_VERSION,
};

/// Error type for adaptive-html operations
#[derive(Debug, thiserror::Error)]
pub enum AdaptiveHtmlError {
    #[error("Conversion error: {0}")]
    ConversionError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AdaptiveHtmlError>;
