//! Adaptive Card element model
//!
//! This module defines the typed display elements a card body is built from.
//! Every element serializes with a `"type"` discriminator and only the fields
//! that are legal for that type.

use serde::{Deserialize, Serialize};

/// A card body element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CardElement {
    /// Block of (markdown-flavoured) text
    TextBlock(TextBlock),

    /// Image referenced by URL
    Image(Image),

    /// Vertical grouping of elements
    Container(Container),

    /// Single column of a column set
    Column(Column),

    /// Horizontal set of columns
    ColumnSet(ColumnSet),

    /// Block of independently styled text runs
    RichTextBlock(RichTextBlock),
}

/// Text size values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextSize {
    Small,
    #[default]
    Default,
    Medium,
    Large,
    ExtraLarge,
}

/// Text weight values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextWeight {
    Lighter,
    #[default]
    Default,
    Bolder,
}

/// Text block style values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextBlockStyle {
    #[default]
    Default,
    Heading,
}

/// Container and column style values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContainerStyle {
    #[default]
    Default,
    Emphasis,
    Good,
    Attention,
    Warning,
    Accent,
}

/// Font type values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontType {
    #[default]
    Default,
    Monospace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    pub wrap: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<TextSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<TextWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<TextBlockStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Box<CardElement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Box<CardElement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default)]
    pub items: Vec<CardElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ContainerStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(default)]
    pub items: Vec<CardElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ContainerStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSet {
    #[serde(default, with = "tagged_columns")]
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextBlock {
    #[serde(default, with = "tagged_text_runs")]
    pub inlines: Vec<TextRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_type: Option<FontType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
}

impl TextBlock {
    /// Create a wrapping text block with no styling
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            wrap: true,
            size: None,
            weight: None,
            style: None,
            fallback: None,
        }
    }

    /// Create a heading text block for a heading level (1-6)
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        let (size, weight) = heading_size_weight(level);
        Self {
            size: Some(size),
            weight: Some(weight),
            ..Self::new(text)
        }
    }

    /// Return a copy of this block with `prefix` spliced in front of its text
    pub fn with_prefix(self, prefix: &str) -> Self {
        Self {
            text: format!("{}{}", prefix, self.text),
            ..self
        }
    }
}

/// Size/weight pair used to encode a heading level.
///
/// Level 4 is the only level rendered without bold.
pub fn heading_size_weight(level: u8) -> (TextSize, TextWeight) {
    match level {
        1 => (TextSize::ExtraLarge, TextWeight::Bolder),
        2 => (TextSize::Large, TextWeight::Bolder),
        3 => (TextSize::Medium, TextWeight::Bolder),
        4 => (TextSize::Medium, TextWeight::Default),
        6 => (TextSize::Small, TextWeight::Bolder),
        _ => (TextSize::Default, TextWeight::Bolder),
    }
}

impl Image {
    pub fn new(url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt_text: alt_text.into(),
            fallback: None,
        }
    }

    /// Attach an element shown by hosts that cannot render images
    pub fn with_fallback(mut self, fallback: CardElement) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }
}

impl Container {
    /// Create a minimal container (no style)
    pub fn new(items: Vec<CardElement>) -> Self {
        Self { items, style: None }
    }

    pub fn with_style(items: Vec<CardElement>, style: ContainerStyle) -> Self {
        Self {
            items,
            style: Some(style),
        }
    }

    /// A container is minimal when it carries nothing besides its items
    pub fn is_minimal(&self) -> bool {
        self.style.is_none()
    }
}

impl Column {
    pub fn new(items: Vec<CardElement>) -> Self {
        Self { items, style: None }
    }

    pub fn with_style(items: Vec<CardElement>, style: ContainerStyle) -> Self {
        Self {
            items,
            style: Some(style),
        }
    }
}

impl ColumnSet {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }
}

impl RichTextBlock {
    pub fn new(inlines: Vec<TextRun>) -> Self {
        Self { inlines }
    }
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_type: None,
            highlight: None,
            wrap: None,
        }
    }

    /// Monospaced, wrapping run used for code
    pub fn monospace(text: impl Into<String>) -> Self {
        Self {
            font_type: Some(FontType::Monospace),
            wrap: Some(true),
            ..Self::new(text)
        }
    }

    pub fn highlighted(mut self) -> Self {
        self.highlight = Some(true);
        self
    }
}

impl CardElement {
    /// The `"type"` discriminator of this element
    pub fn type_name(&self) -> &'static str {
        match self {
            CardElement::TextBlock(_) => "TextBlock",
            CardElement::Image(_) => "Image",
            CardElement::Container(_) => "Container",
            CardElement::Column(_) => "Column",
            CardElement::ColumnSet(_) => "ColumnSet",
            CardElement::RichTextBlock(_) => "RichTextBlock",
        }
    }

    pub fn is_text_block(&self) -> bool {
        matches!(self, CardElement::TextBlock(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(self, CardElement::Container(_))
    }

    pub fn is_image(&self) -> bool {
        matches!(self, CardElement::Image(_))
    }

    /// Check if this is a container with only `type` and `items`
    pub fn is_minimal_container(&self) -> bool {
        matches!(self, CardElement::Container(container) if container.is_minimal())
    }

    pub fn as_text_block(&self) -> Option<&TextBlock> {
        match self {
            CardElement::TextBlock(block) => Some(block),
            _ => None,
        }
    }
}

impl From<TextBlock> for CardElement {
    fn from(block: TextBlock) -> Self {
        CardElement::TextBlock(block)
    }
}

impl From<Image> for CardElement {
    fn from(image: Image) -> Self {
        CardElement::Image(image)
    }
}

impl From<Container> for CardElement {
    fn from(container: Container) -> Self {
        CardElement::Container(container)
    }
}

impl From<Column> for CardElement {
    fn from(column: Column) -> Self {
        CardElement::Column(column)
    }
}

impl From<ColumnSet> for CardElement {
    fn from(column_set: ColumnSet) -> Self {
        CardElement::ColumnSet(column_set)
    }
}

impl From<RichTextBlock> for CardElement {
    fn from(block: RichTextBlock) -> Self {
        CardElement::RichTextBlock(block)
    }
}

// Columns inside a column set carry their own "type" tag.
mod tagged_columns {
    use super::Column;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    #[serde(tag = "type")]
    enum Tagged<'a> {
        Column(&'a Column),
    }

    #[derive(Deserialize)]
    #[serde(tag = "type")]
    enum Owned {
        Column(Column),
    }

    pub fn serialize<S: Serializer>(columns: &[Column], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(columns.iter().map(Tagged::Column))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Column>, D::Error> {
        let columns = Vec::<Owned>::deserialize(deserializer)?;
        Ok(columns
            .into_iter()
            .map(|Owned::Column(column)| column)
            .collect())
    }
}

mod tagged_text_runs {
    use super::TextRun;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    #[serde(tag = "type")]
    enum Tagged<'a> {
        TextRun(&'a TextRun),
    }

    #[derive(Deserialize)]
    #[serde(tag = "type")]
    enum Owned {
        TextRun(TextRun),
    }

    pub fn serialize<S: Serializer>(runs: &[TextRun], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(runs.iter().map(Tagged::TextRun))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<TextRun>, D::Error> {
        let runs = Vec::<Owned>::deserialize(deserializer)?;
        Ok(runs.into_iter().map(|Owned::TextRun(run)| run).collect())
    }
}
