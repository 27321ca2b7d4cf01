//! Field kinds and field definitions.
//!
//! All types serialize to/from JSON via serde. A field definition
//! describes one named, typed attribute of a custom section; the kind
//! determines what value shape is accepted and how the value is edited
//! and displayed.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::{FieldsError, Result};
use crate::value::FieldValue;

/// Identifier of a field definition, unique within its owning section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(Ulid);

impl FieldId {
    /// Generate a fresh, collision-resistant id (client-assigned).
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The kind of a field; determines what shape the value takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single-line plain string
    Text,
    /// Multi-line plain string
    Textarea,
    /// Opaque structured rich content, never inspected by the core
    #[serde(rename = "richtext")]
    RichText,
    /// Year-month granularity value, stored as a plain string
    Date,
    Url,
    Email,
    Phone,
}

impl FieldKind {
    /// All kinds, in declaration order. Useful for pickers and tests.
    pub const ALL: [FieldKind; 7] = [
        Self::Text,
        Self::Textarea,
        Self::RichText,
        Self::Date,
        Self::Url,
        Self::Email,
        Self::Phone,
    ];

    /// The zero value stored for a freshly created entry.
    pub fn zero_value(self) -> FieldValue {
        match self {
            Self::RichText => FieldValue::empty_rich(),
            Self::Text | Self::Textarea | Self::Date | Self::Url | Self::Email | Self::Phone => {
                FieldValue::Text(String::new())
            }
        }
    }

    /// Whether this kind stores structured (non-string) content.
    pub fn accepts_rich_content(self) -> bool {
        matches!(self, Self::RichText)
    }

    /// The editing affordance for this kind.
    pub fn editor(self) -> Editor {
        match self {
            Self::Text => Editor::SingleLine,
            Self::Textarea => Editor::MultiLine,
            Self::RichText => Editor::RichText,
            Self::Date => Editor::MonthPicker,
            Self::Url => Editor::Url,
            Self::Email => Editor::Email,
            Self::Phone => Editor::Phone,
        }
    }

    /// The read-only display affordance for this kind.
    pub fn display(self) -> Display {
        match self {
            Self::Text => Display::Text,
            Self::Textarea => Display::Paragraph,
            Self::RichText => Display::RichText,
            Self::Date => Display::Month,
            Self::Url => Display::Link,
            Self::Email => Display::Email,
            Self::Phone => Display::Phone,
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::RichText => "richtext",
            Self::Date => "date",
            Self::Url => "url",
            Self::Email => "email",
            Self::Phone => "phone",
        };
        f.write_str(s)
    }
}

/// How a field value is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Editor {
    SingleLine,
    MultiLine,
    RichText,
    MonthPicker,
    Url,
    Email,
    Phone,
}

/// How a field value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    Text,
    Paragraph,
    RichText,
    Month,
    Link,
    Email,
    Phone,
}

/// A field definition: the schema for a single named attribute.
///
/// Owned exclusively by its section; definitions are never shared
/// across sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDefinition {
    pub id: FieldId,
    pub name: String,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl FieldDefinition {
    /// Create a definition with a fresh id.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: FieldId::new(),
            name: name.into(),
            kind,
            placeholder: None,
            required: false,
        }
    }

    /// Set the placeholder hint
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Mark the field required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Validate a field definition before it is accepted into a schema.
///
/// Unknown kinds are unrepresentable (serde rejects them at the wire
/// boundary), so the only structural check left is the name.
pub fn validate_definition(def: &FieldDefinition) -> Result<()> {
    if def.name.trim().is_empty() {
        return Err(FieldsError::schema("field name cannot be empty"));
    }
    Ok(())
}
