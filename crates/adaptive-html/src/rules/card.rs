//! Adaptive Card rules for HTML conversion.

use adaptive_html_core::{
    non_text_blocks, text_blocks_as_string, unwrap, wrap, wrap_with_style, CardElement, Column,
    ColumnSet, Container, ContainerStyle, Image, RichTextBlock, TextBlock, TextRun,
};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Filter, Replacement, Rule};
use crate::options::AdaptiveHtmlOptions;
use crate::utilities::{
    clean_attribute, is_blank, is_meaningful_when_blank, LINE_BREAK, NESTED_LIST_MARKER,
};

static LEADING_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid regex"));

const INDENTED_LINE_BREAK: &str = "  \n\t";
const ESCAPED_NESTED_LIST_MARKER: &str = "\r\t\t";

const CODE_SNIPPET: &str = "CODE_SNIPPET";
const CODE_BLOCK_LINE: &str = "CODE_BLOCK_LINE";
const VIDEO: &str = "VIDEO";

/// Create all card rules, in matching order
pub fn card_rules() -> Vec<Rule> {
    vec![
        blank_rule(),
        text_rule(),
        line_break_rule(),
        heading_rule(),
        list_rule(),
        list_item_rule(),
        inline_link_rule(),
        emphasis_rule(),
        strong_rule(),
        iframe_rule(),
        image_rule(),
        table_section_rule(),
        table_row_rule(),
        table_cell_rule(),
        table_rule(),
        code_rule(),
    ]
}

/// Catch-all rule: blocks are wrapped, inline nodes pass their content through
pub fn default_rule() -> Rule {
    Rule::new(Filter::any(), |content, node, _| {
        if node.is_block() {
            wrap(content).into()
        } else {
            content.into()
        }
    })
}

fn blank_rule() -> Rule {
    Rule::new(
        Filter::predicate(|tag, node, options| {
            !is_meaningful_when_blank(tag)
                && !options.is_void(tag)
                && is_blank(&node.text_content())
                && !node
                    .node
                    .has_descendant(|n| options.is_void(&n.tag_name()))
        }),
        |content, node, _| {
            let text = node.text_content();
            if text.is_empty() {
                return Replacement::empty();
            }
            Replacement::text_effect(content, |_| text)
        },
    )
}

fn text_rule() -> Rule {
    Rule::new(
        Filter::predicate(|_, node, _| node.node.is_character_data()),
        |content, node, _| {
            let text = node.node_value().to_string();
            Replacement::text_effect(content, |_| text)
        },
    )
}

fn line_break_rule() -> Rule {
    Rule::for_tag("br", |content, _, _| {
        Replacement::text_effect(content, |_| LINE_BREAK.to_string())
    })
}

fn heading_rule() -> Rule {
    Rule::for_tags(&["h1", "h2", "h3", "h4", "h5", "h6"], |content, node, _| {
        let level: u8 = node.tag_name()[1..].parse().unwrap_or(1);
        let text = text_blocks_as_string(&content);

        let mut elements = vec![TextBlock::heading(text, level).into()];
        elements.extend(non_text_blocks(content));
        wrap(elements).into()
    })
}

fn list_rule() -> Rule {
    // content = one container per list item
    Rule::for_tags(&["ul", "ol"], |content, node, _| {
        let ordered = node.tag_name() == "ol";
        let start = list_start(node.attr("start"));

        let mut blocks = Vec::new();
        for (index, item) in content.into_iter().enumerate() {
            let mut elements = unwrap(item).into_iter();
            if let Some(first) = elements.next() {
                blocks.push(match first {
                    CardElement::TextBlock(block) => {
                        let prefix = if ordered {
                            format!("{}. ", start.saturating_add(index as i64))
                        } else {
                            "- ".to_string()
                        };
                        block.with_prefix(&prefix).into()
                    }
                    other => other,
                });
            }
            blocks.extend(elements);
        }

        wrap(blocks).into()
    })
}

/// Parse a list `start` attribute like `parseInt`, defaulting to 1
fn list_start(value: Option<&str>) -> i64 {
    value
        .and_then(|v| LEADING_INTEGER.captures(v))
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .filter(|start| *start != 0)
        .unwrap_or(1)
}

fn list_item_rule() -> Rule {
    Rule::for_tag("li", |content, _, _| {
        let mut text = String::new();
        let mut blocks = Vec::new();

        for element in content {
            match element {
                CardElement::TextBlock(block) => {
                    text.push(' ');
                    text.push_str(block.text.replace(LINE_BREAK, INDENTED_LINE_BREAK).trim());
                }
                // Nested lists arrive as containers; their text is folded into
                // this item with one marker per nesting level
                CardElement::Container(container) => {
                    for nested in container.items {
                        match nested {
                            CardElement::TextBlock(block) => {
                                text.push_str(NESTED_LIST_MARKER);
                                text.push_str(
                                    &block
                                        .text
                                        .replace(NESTED_LIST_MARKER, ESCAPED_NESTED_LIST_MARKER)
                                        .replace(LINE_BREAK, INDENTED_LINE_BREAK),
                                );
                            }
                            other => blocks.push(other),
                        }
                    }
                }
                image @ CardElement::Image(_) => blocks.push(image),
                other => {
                    warn!("Unsupported card type in list item: {}", other.type_name());
                }
            }
        }

        let text = text.trim();
        if !text.is_empty() {
            blocks.insert(0, TextBlock::new(text).into());
        }

        wrap(blocks).into()
    })
}

fn inline_link_rule() -> Rule {
    Rule::new(
        Filter::predicate(|tag, node, _| {
            tag == "a" && !clean_attribute(node.attr("href")).is_empty()
        }),
        |content, node, _| {
            let href = clean_attribute(node.attr("href"));
            Replacement::text_effect(content, |text| format!("[{}]({})", text, href))
        },
    )
}

fn emphasis_rule() -> Rule {
    Rule::for_tags(&["em", "i"], |content, _, options| {
        let delimiter = options.em_delimiter;
        Replacement::text_effect(content, |text| {
            if text.trim().is_empty() {
                return text;
            }
            format!("{}{}{}", delimiter, text, delimiter)
        })
    })
}

fn strong_rule() -> Rule {
    Rule::for_tags(&["strong", "b"], |content, _, options| {
        let delimiter = &options.strong_delimiter;
        Replacement::text_effect(content, |text| {
            if text.trim().is_empty() {
                return text;
            }
            format!("{}{}{}", delimiter, text, delimiter)
        })
    })
}

fn iframe_rule() -> Rule {
    Rule::for_tag("iframe", |_, node, options| {
        let fallback_text = if node.attr(&options.content_type_attribute) == Some(VIDEO) {
            &options.video_fallback_text
        } else {
            &options.embed_fallback_text
        };

        wrap_with_style(
            vec![TextBlock::new(fallback_text.clone()).into()],
            ContainerStyle::Attention,
        )
        .into()
    })
}

fn image_rule() -> Rule {
    Rule::for_tag("img", |_, node, options| {
        let src = clean_attribute(node.attr("src"));
        let alt = clean_attribute(node.attr("alt"));

        let mut image = Image::new(src, alt);
        if let Some(fallback_text) = &options.image_fallback_text {
            let fallback = Container::new(vec![TextBlock::new(fallback_text.clone()).into()]);
            image = image.with_fallback(fallback.into());
        }

        CardElement::from(image).into()
    })
}

fn table_section_rule() -> Rule {
    Rule::new(
        Filter::predicate(|tag, node, _| {
            matches!(tag, "thead" | "tbody" | "tfoot")
                || (tag == "table" && node.element_children().any(|c| c.tag_name() == "tr"))
        }),
        |rows, _, options| table_section(rows, options),
    )
}

/// Turn a section's rows into a column set, or the fallback text when the
/// table is too wide or a cell too long
fn table_section(rows: Vec<CardElement>, options: &AdaptiveHtmlOptions) -> Replacement {
    let rows: Vec<Vec<CardElement>> = rows.into_iter().map(unwrap).collect();
    let Some(first_row) = rows.first() else {
        return Replacement::empty();
    };

    let column_count = first_row.len();
    let too_wide = column_count > options.max_table_columns;
    let too_long = rows
        .iter()
        .flatten()
        .any(|cell| cell_text_len(cell) > options.max_cell_characters);

    if too_wide || too_long {
        debug!(
            "Table with {} rows and {} columns replaced by fallback text",
            rows.len(),
            column_count
        );
        return CardElement::from(TextBlock::new(options.table_fallback_text.clone())).into();
    }

    // Transpose rows into columns; row order is kept within each column
    let mut rows: Vec<_> = rows.into_iter().map(Vec::into_iter).collect();
    let columns = (0..column_count)
        .map(|_| {
            let items = rows
                .iter_mut()
                .filter_map(|cells| cells.next())
                .flat_map(unwrap)
                .collect();
            Column::with_style(items, ContainerStyle::Emphasis)
        })
        .collect();

    CardElement::from(ColumnSet::new(columns)).into()
}

fn cell_text_len(cell: &CardElement) -> usize {
    match cell {
        CardElement::Container(container) => text_blocks_as_string(&container.items).chars().count(),
        CardElement::TextBlock(block) => block.text.chars().count(),
        _ => 0,
    }
}

fn table_row_rule() -> Rule {
    // Always a fresh container so a one-cell row keeps its cell boundary
    Rule::for_tag("tr", |cells, _, _| CardElement::from(Container::new(cells)).into())
}

fn table_cell_rule() -> Rule {
    Rule::for_tags(&["th", "td"], |content, _, _| wrap(content).into())
}

fn table_rule() -> Rule {
    Rule::for_tag("table", |content, _, _| content.into())
}

fn code_rule() -> Rule {
    Rule::for_tag("code", |content, node, options| {
        let text = content
            .first()
            .and_then(CardElement::as_text_block)
            .map(|block| block.text.clone())
            .unwrap_or_default();

        match node.attr(&options.content_type_attribute) {
            Some(CODE_SNIPPET) => {
                let run = TextRun::monospace(text).highlighted();
                CardElement::from(RichTextBlock::new(vec![run])).into()
            }
            Some(CODE_BLOCK_LINE) => {
                let block = RichTextBlock::new(vec![TextRun::monospace(text)]);
                wrap_with_style(vec![block.into()], ContainerStyle::Emphasis).into()
            }
            _ => wrap(content).into(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Node, NodeRef};

    fn apply(rule: &Rule, content: Vec<CardElement>, node: &Node) -> Replacement {
        rule.replace(content, &NodeRef::new(node), &AdaptiveHtmlOptions::default())
    }

    fn text(s: &str) -> CardElement {
        TextBlock::new(s).into()
    }

    fn item(elements: Vec<CardElement>) -> CardElement {
        wrap(elements)
    }

    #[test]
    fn test_list_start() {
        assert_eq!(list_start(None), 1);
        assert_eq!(list_start(Some("2")), 2);
        assert_eq!(list_start(Some(" 7th")), 7);
        assert_eq!(list_start(Some("0")), 1);
        assert_eq!(list_start(Some("-3")), -3);
        assert_eq!(list_start(Some("abc")), 1);
        assert_eq!(list_start(Some("9223372036854775807")), i64::MAX);
    }

    #[test]
    fn test_ordered_list_start_at_limit() {
        let ol = Node::element_with_attrs("ol", vec![("start", "9223372036854775807")]);
        let content = vec![item(vec![text("a")]), item(vec![text("b")])];
        let Replacement::Element(container) = apply(&list_rule(), content, &ol) else {
            panic!("expected an element");
        };
        assert_eq!(
            unwrap(container),
            vec![
                text("9223372036854775807. a"),
                text("9223372036854775807. b")
            ]
        );
    }

    #[test]
    fn test_ordered_list_prefixes() {
        let ol = Node::element_with_attrs("ol", vec![("start", "2")]);
        let content = vec![item(vec![text("first")]), item(vec![text("second")])];
        let Replacement::Element(container) = apply(&list_rule(), content, &ol) else {
            panic!("expected an element");
        };
        assert_eq!(unwrap(container), vec![text("2. first"), text("3. second")]);
    }

    #[test]
    fn test_unordered_list_keeps_non_text_first_elements() {
        let ul = Node::element("ul");
        let image: CardElement = Image::new("x.png", "").into();
        let content = vec![item(vec![image.clone(), text("after")]), item(vec![text("b")])];
        let Replacement::Element(container) = apply(&list_rule(), content, &ul) else {
            panic!("expected an element");
        };
        assert_eq!(unwrap(container), vec![image, text("after"), text("- b")]);
    }

    #[test]
    fn test_list_item_folds_nested_lists() {
        let li = Node::element("li");
        let nested = wrap(vec![
            text("- Nested 1\r\t- Deeper"),
            text("- Nested 2"),
        ]);
        let Replacement::Element(result) = apply(&list_item_rule(), vec![text("Item"), nested], &li) else {
            panic!("expected an element");
        };
        assert_eq!(
            unwrap(result),
            vec![text("Item\r\t- Nested 1\r\t\t- Deeper\r\t- Nested 2")]
        );
    }

    #[test]
    fn test_list_item_drops_unsupported_elements() {
        let li = Node::element("li");
        let rich: CardElement = RichTextBlock::new(vec![TextRun::new("x")]).into();
        let Replacement::Element(result) = apply(&list_item_rule(), vec![text("Item"), rich], &li) else {
            panic!("expected an element");
        };
        assert_eq!(unwrap(result), vec![text("Item")]);
    }

    #[test]
    fn test_heading_collects_non_text() {
        let h3 = Node::element("h3");
        let image: CardElement = Image::new("x.png", "").into();
        let content = vec![text("Heading "), image.clone(), text("text")];
        let Replacement::Element(result) = apply(&heading_rule(), content, &h3) else {
            panic!("expected an element");
        };
        assert_eq!(
            unwrap(result),
            vec![TextBlock::heading("Heading text", 3).into(), image]
        );
    }

    #[test]
    fn test_emphasis_without_text() {
        let em = Node::element("em");
        let image: CardElement = Image::new("x.png", "").into();
        assert_eq!(
            apply(&emphasis_rule(), vec![image.clone()], &em),
            Replacement::Text {
                text: String::new(),
                non_text: vec![image],
            }
        );
    }

    #[test]
    fn test_iframe_video_fallback() {
        let options = AdaptiveHtmlOptions::default();
        let iframe = Node::element_with_attrs("iframe", vec![("data-ghq-card-content-type", "VIDEO")]);
        let Replacement::Element(CardElement::Container(container)) =
            apply(&iframe_rule(), Vec::new(), &iframe)
        else {
            panic!("expected a container");
        };
        assert_eq!(container.style, Some(ContainerStyle::Attention));
        assert_eq!(container.items, vec![text(&options.video_fallback_text)]);
    }

    #[test]
    fn test_table_section_transposes() {
        let options = AdaptiveHtmlOptions::default();
        let row = |a: &str, b: &str| {
            CardElement::from(Container::new(vec![wrap(vec![text(a)]), wrap(vec![text(b)])]))
        };
        let Replacement::Element(CardElement::ColumnSet(set)) =
            table_section(vec![row("a1", "b1"), row("a2", "b2")], &options)
        else {
            panic!("expected a column set");
        };
        assert_eq!(set.columns.len(), 2);
        assert_eq!(set.columns[0].items, vec![text("a1"), text("a2")]);
        assert_eq!(set.columns[1].items, vec![text("b1"), text("b2")]);
        assert_eq!(set.columns[0].style, Some(ContainerStyle::Emphasis));
    }

    #[test]
    fn test_table_section_multi_element_cells_stay_in_column() {
        let options = AdaptiveHtmlOptions::default();
        let image: CardElement = Image::new("x.png", "").into();
        let rows = vec![CardElement::from(Container::new(vec![
            wrap(vec![text("a"), image.clone()]),
            wrap(vec![text("b")]),
        ]))];
        let Replacement::Element(CardElement::ColumnSet(set)) = table_section(rows, &options) else {
            panic!("expected a column set");
        };
        assert_eq!(set.columns[0].items, vec![text("a"), image]);
        assert_eq!(set.columns[1].items, vec![text("b")]);
    }

    #[test]
    fn test_table_section_fallbacks() {
        let options = AdaptiveHtmlOptions::default();
        let fallback = Replacement::Element(text(&options.table_fallback_text));

        let wide = CardElement::from(Container::new(
            (0..4).map(|_| wrap(vec![text("x")])).collect(),
        ));
        assert_eq!(table_section(vec![wide], &options), fallback);

        let long = CardElement::from(Container::new(vec![wrap(vec![text(&"9".repeat(101))])]));
        assert_eq!(table_section(vec![long], &options), fallback);

        let limit = CardElement::from(Container::new(vec![wrap(vec![text(&"9".repeat(100))])]));
        assert_ne!(table_section(vec![limit], &options), fallback);

        assert_eq!(table_section(Vec::new(), &options), Replacement::empty());
    }

    #[test]
    fn test_code_content_types() {
        let snippet = Node::element_with_attrs("code", vec![("data-ghq-card-content-type", "CODE_SNIPPET")]);
        assert_eq!(
            apply(&code_rule(), vec![text("x = 1")], &snippet),
            Replacement::Element(
                RichTextBlock::new(vec![TextRun::monospace("x = 1").highlighted()]).into()
            )
        );

        let plain = Node::element("code");
        assert_eq!(
            apply(&code_rule(), vec![text("x = 1")], &plain),
            Replacement::Element(wrap(vec![text("x = 1")]))
        );
    }
}
