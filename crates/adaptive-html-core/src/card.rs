//! Card assembly and card JSON validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::container::unwrap;
use crate::element::CardElement;

/// Card format version produced by this crate
pub const CARD_VERSION: &str = "1.2";

/// Card format versions accepted when parsing card JSON
pub const SUPPORTED_VERSIONS: &[&str] = &["1.0", "1.1", "1.2"];

/// Error type for card JSON parsing
#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("{0} is not valid Adaptive Card JSON.")]
    InvalidCard(String),
}

/// The root of a card document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct AdaptiveCard {
    #[serde(default)]
    pub body: Vec<CardElement>,
    /// Always empty for converted documents
    #[serde(default)]
    pub actions: Vec<Value>,
    pub version: String,
}

impl AdaptiveCard {
    /// Assemble a card from the top-level element sequence.
    ///
    /// A lone minimal container is unwrapped so its items become the body.
    /// Styled containers are kept.
    pub fn from_elements(mut elements: Vec<CardElement>) -> Self {
        let body = if elements.len() == 1 && elements[0].is_minimal_container() {
            unwrap(elements.remove(0))
        } else {
            elements
        };

        Self {
            body,
            actions: Vec::new(),
            version: CARD_VERSION.to_string(),
        }
    }

    /// Build a card from a JSON value, validating root type and version
    pub fn from_value(value: Value) -> Result<Self, CardError> {
        if !is_valid_card_json(&value) {
            return Err(CardError::InvalidCard(value.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }
}

impl Default for AdaptiveCard {
    fn default() -> Self {
        Self::from_elements(Vec::new())
    }
}

/// Check the root `type` and `version` of card JSON
pub fn is_valid_card_json(value: &Value) -> bool {
    let is_card = value.get("type").and_then(Value::as_str) == Some("AdaptiveCard");
    let version = value.get("version").and_then(Value::as_str);
    is_card && version.is_some_and(|v| SUPPORTED_VERSIONS.contains(&v))
}

/// Parse a card JSON string
pub fn parse_card(json: &str) -> Result<AdaptiveCard, CardError> {
    let value: Value = serde_json::from_str(json)?;
    AdaptiveCard::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::wrap;
    use crate::element::{Container, ContainerStyle, TextBlock};
    use serde_json::json;

    #[test]
    fn test_empty_card() {
        let card = AdaptiveCard::from_elements(Vec::new());
        assert_eq!(
            serde_json::to_value(&card).unwrap(),
            json!({ "type": "AdaptiveCard", "body": [], "actions": [], "version": "1.2" })
        );
    }

    #[test]
    fn test_unwraps_lone_minimal_container() {
        let card = AdaptiveCard::from_elements(vec![wrap(vec![
            TextBlock::new("a").into(),
            TextBlock::new("b").into(),
        ])]);
        assert_eq!(card.body.len(), 2);
        assert!(card.body.iter().all(CardElement::is_text_block));
    }

    #[test]
    fn test_keeps_styled_container() {
        let styled: CardElement =
            Container::with_style(vec![TextBlock::new("a").into()], ContainerStyle::Attention).into();
        let card = AdaptiveCard::from_elements(vec![styled.clone()]);
        assert_eq!(card.body, vec![styled]);
    }

    #[test]
    fn test_keeps_multiple_containers() {
        let first = wrap(vec![TextBlock::new("a").into()]);
        let second = wrap(vec![TextBlock::new("b").into()]);
        let card = AdaptiveCard::from_elements(vec![first.clone(), second.clone()]);
        assert_eq!(card.body, vec![first, second]);
    }

    #[test]
    fn test_parse_card() {
        let card = parse_card(
            r#"{"type":"AdaptiveCard","version":"1.0","body":[{"type":"TextBlock","text":"hi","wrap":true}],"actions":[]}"#,
        )
        .unwrap();
        assert_eq!(card.version, "1.0");
        assert_eq!(card.body, vec![TextBlock::new("hi").into()]);
    }

    #[test]
    fn test_parse_card_round_trip_of_own_output() {
        let card = AdaptiveCard::from_elements(vec![TextBlock::heading("Title", 1).into()]);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(parse_card(&json).unwrap(), card);
    }

    #[test]
    fn test_parse_card_rejects_wrong_type_or_version() {
        let wrong_type = parse_card(r#"{"type":"Container","version":"1.0","items":[]}"#);
        assert!(matches!(wrong_type, Err(CardError::InvalidCard(_))));

        let wrong_version = parse_card(r#"{"type":"AdaptiveCard","version":"9.9","body":[]}"#);
        assert!(matches!(wrong_version, Err(CardError::InvalidCard(_))));

        let not_json = parse_card("{not json");
        assert!(matches!(not_json, Err(CardError::InvalidJson(_))));
    }
}
