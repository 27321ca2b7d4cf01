//! Field values and raw-value coercion.
//!
//! Every kind except richtext stores a plain trimmed string. Richtext
//! stores an opaque structured-content value that the core never parses
//! or mutates; it belongs to the editing widget.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FieldsError, Result};
use crate::types::FieldKind;

/// Opaque structured rich content.
///
/// Carried as a serializable blob. No component outside the rich-text
/// editing widget may inspect its internals; the engine only moves it
/// around and serializes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichContent(Value);

impl RichContent {
    /// Wrap an editor-produced structured value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// An empty document, used as the zero value for richtext fields.
    pub fn empty() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }

    /// The underlying blob, for serialization at the boundary.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Whether the document holds no content at all.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            _ => false,
        }
    }
}

/// A stored field value, canonical per its field's kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Rich(RichContent),
}

impl FieldValue {
    /// The zero value for richtext fields.
    pub fn empty_rich() -> Self {
        Self::Rich(RichContent::empty())
    }

    /// Whether this value holds nothing displayable.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Rich(doc) => doc.is_empty(),
        }
    }

    /// Plain-text rendering for list display. Rich content is opaque
    /// here, so it renders as a placeholder rather than its internals.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Rich(_) => "…",
        }
    }
}

/// Coerce a submitted raw value into the canonical stored
/// representation for `kind`.
///
/// Richtext passes the structured value through opaquely; every other
/// kind trims a plain string. Structurally incompatible input fails
/// with a value-type error and nothing is stored.
pub fn coerce_value(kind: FieldKind, raw: Value) -> Result<FieldValue> {
    if kind.accepts_rich_content() {
        return match raw {
            Value::Object(_) | Value::Array(_) => Ok(FieldValue::Rich(RichContent::new(raw))),
            Value::Null => Ok(FieldValue::empty_rich()),
            other => Err(FieldsError::value_type(kind.to_string(), type_name(&other))),
        };
    }

    match raw {
        Value::String(s) => Ok(FieldValue::Text(s.trim().to_string())),
        Value::Null => Ok(FieldValue::Text(String::new())),
        other => Err(FieldsError::value_type(kind.to_string(), type_name(&other))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerce_trims_plain_strings() {
        let value = coerce_value(FieldKind::Text, json!("  Acme Inc.  ")).unwrap();
        assert_eq!(value, FieldValue::Text("Acme Inc.".into()));
    }

    #[test]
    fn coerce_null_to_empty_string() {
        let value = coerce_value(FieldKind::Email, Value::Null).unwrap();
        assert_eq!(value, FieldValue::Text(String::new()));
    }

    #[test]
    fn coerce_rejects_object_for_text() {
        let err = coerce_value(FieldKind::Text, json!({"doc": []})).unwrap_err();
        assert!(matches!(err, FieldsError::ValueType { .. }));
        assert!(err.to_string().contains("object"));
    }

    #[test]
    fn coerce_rejects_number_for_date() {
        let err = coerce_value(FieldKind::Date, json!(2024)).unwrap_err();
        assert!(matches!(err, FieldsError::ValueType { .. }));
    }

    #[test]
    fn coerce_richtext_passes_structure_through() {
        let doc = json!({"type": "doc", "content": [{"type": "paragraph"}]});
        let value = coerce_value(FieldKind::RichText, doc.clone()).unwrap();
        match value {
            FieldValue::Rich(rich) => assert_eq!(rich.as_value(), &doc),
            FieldValue::Text(_) => panic!("expected rich value"),
        }
    }

    #[test]
    fn coerce_rejects_string_for_richtext() {
        let err = coerce_value(FieldKind::RichText, json!("plain")).unwrap_err();
        assert!(matches!(err, FieldsError::ValueType { .. }));
    }

    #[test]
    fn zero_values_are_empty() {
        for kind in FieldKind::ALL {
            assert!(kind.zero_value().is_empty());
        }
    }

    #[test]
    fn rich_zero_value_is_rich() {
        assert!(matches!(
            FieldKind::RichText.zero_value(),
            FieldValue::Rich(_)
        ));
    }

    #[test]
    fn display_text_keeps_rich_opaque() {
        let value = FieldValue::Rich(RichContent::new(json!({"secret": "inside"})));
        assert!(!value.display_text().contains("secret"));
    }

    #[test]
    fn field_value_json_round_trip() {
        let text = FieldValue::Text("hello".into());
        let json = serde_json::to_string(&text).unwrap();
        assert_eq!(json, "\"hello\"");
        let parsed: FieldValue = serde_json::from_str(&json).unwrap();
        assert_eq!(text, parsed);

        let rich = FieldValue::Rich(RichContent::new(json!({"type": "doc"})));
        let json = serde_json::to_string(&rich).unwrap();
        let parsed: FieldValue = serde_json::from_str(&json).unwrap();
        assert_eq!(rich, parsed);
    }
}
