//! adaptive-html-core - Adaptive Card element model and assembly
//!
//! This crate provides the card data structures shared by the HTML converter
//! in `adaptive-html`: the typed body elements, the container wrap/unwrap
//! canonicalization, and the assembly of a top-level card document.
//!
//! # Architecture
//!
//! ```text
//!                  ┌──────────────┐
//! DOM rules ─────▶ │ CardElement  │ ──wrap/unwrap──▶ AdaptiveCard ──serde──▶ JSON
//!                  └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use adaptive_html_core::{wrap, AdaptiveCard, TextBlock};
//!
//! let container = wrap(vec![
//!     TextBlock::heading("Hello World", 1).into(),
//!     TextBlock::new("This is **bold** text.").into(),
//! ]);
//!
//! let card = AdaptiveCard::from_elements(vec![container]);
//! assert_eq!(card.body.len(), 2);
//!
//! let json = serde_json::to_string(&card).unwrap();
//! assert!(json.contains("\"type\":\"AdaptiveCard\""));
//! ```

mod card;
mod container;
mod element;

pub use card::{is_valid_card_json, parse_card, AdaptiveCard, CardError, CARD_VERSION, SUPPORTED_VERSIONS};
pub use container::{non_text_blocks, text_blocks_as_string, unwrap, wrap, wrap_with_style};
pub use element::{
    heading_size_weight, CardElement, Column, ColumnSet, Container, ContainerStyle, FontType, Image,
    RichTextBlock, TextBlock, TextBlockStyle, TextRun, TextSize, TextWeight,
};
