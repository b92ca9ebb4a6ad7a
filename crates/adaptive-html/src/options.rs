//! Configuration options for HTML to card conversion

use serde::{Deserialize, Serialize};

use crate::utilities::VOID_ELEMENTS;

/// Options for AdaptiveHtmlService
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdaptiveHtmlOptions {
    /// Emphasis delimiter
    pub em_delimiter: char,

    /// Strong delimiter
    pub strong_delimiter: String,

    /// Widest table rendered as a column set
    pub max_table_columns: usize,

    /// Longest cell text (in characters) rendered as a column set
    pub max_cell_characters: usize,

    /// Text shown in place of tables that exceed the limits
    pub table_fallback_text: String,

    /// Text shown in place of embedded frames
    pub embed_fallback_text: String,

    /// Text shown in place of embedded frames marked as video
    pub video_fallback_text: String,

    /// Text shown by hosts that cannot render images; `None` omits the fallback
    pub image_fallback_text: Option<String>,

    /// Attribute carrying the content type of `<code>` and `<iframe>` elements
    pub content_type_attribute: String,

    /// Elements that never hold text
    pub void_elements: Vec<String>,

    /// Elements whose whitespace is left untouched
    pub preformatted_elements: Vec<String>,
}

impl Default for AdaptiveHtmlOptions {
    fn default() -> Self {
        Self {
            em_delimiter: '_',
            strong_delimiter: "**".to_string(),
            max_table_columns: 3,
            max_cell_characters: 100,
            table_fallback_text:
                "To view this table content, please open this card in the Guru app".to_string(),
            embed_fallback_text:
                "To view this embedded content, please open this Card in the Guru app.".to_string(),
            video_fallback_text:
                "To view this video content, please open this Card in the Guru app.".to_string(),
            image_fallback_text: Some(
                "To view this image, please open this Card in the Guru app.".to_string(),
            ),
            content_type_attribute: "data-ghq-card-content-type".to_string(),
            void_elements: VOID_ELEMENTS.iter().map(|s| s.to_string()).collect(),
            preformatted_elements: vec!["pre".to_string()],
        }
    }
}

impl AdaptiveHtmlOptions {
    /// Check if a tag is configured as a void element
    pub fn is_void(&self, tag: &str) -> bool {
        self.void_elements.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Check if a tag is configured as preformatted
    pub fn is_preformatted(&self, tag: &str) -> bool {
        self.preformatted_elements
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag))
    }
}
