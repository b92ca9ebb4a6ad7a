//! Container canonicalization and queries over element sequences.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::element::{CardElement, Container, ContainerStyle};

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").expect("valid regex"));

/// Wrap elements in a minimal container.
///
/// A lone container is returned unchanged instead of being wrapped again.
pub fn wrap(elements: Vec<CardElement>) -> CardElement {
    wrap_inner(elements, None)
}

/// Wrap elements in a styled container.
///
/// The style only applies when a new container is created; a lone container
/// is returned as-is.
pub fn wrap_with_style(elements: Vec<CardElement>, style: ContainerStyle) -> CardElement {
    wrap_inner(elements, Some(style))
}

fn wrap_inner(mut elements: Vec<CardElement>, style: Option<ContainerStyle>) -> CardElement {
    if elements.len() == 1 && elements[0].is_container() {
        return elements.remove(0);
    }
    CardElement::Container(Container {
        items: elements,
        style,
    })
}

/// Return the items of a container, or the element itself as a sequence
pub fn unwrap(element: CardElement) -> Vec<CardElement> {
    match element {
        CardElement::Container(container) => container.items,
        other => vec![other],
    }
}

/// Join the text of every text block with single spaces.
///
/// Runs of spaces are collapsed and the result is trimmed.
pub fn text_blocks_as_string(elements: &[CardElement]) -> String {
    let joined = elements
        .iter()
        .filter_map(CardElement::as_text_block)
        .map(|block| block.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    SPACE_RUN.replace_all(&joined, " ").trim().to_string()
}

/// Everything that is not a text block, in order
pub fn non_text_blocks(elements: Vec<CardElement>) -> Vec<CardElement> {
    elements
        .into_iter()
        .filter(|element| !element.is_text_block())
        .collect()
}
