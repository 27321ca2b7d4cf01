//! Custom sections: a user-defined schema plus its ordered entries.

use serde::{Deserialize, Serialize};
use vitae_fields::{FieldDefinition, FieldId};

use super::entry::CustomSectionEntry;
use super::ids::{EntryId, SectionId};
use crate::order::Orderable;

/// A user-defined section: its field schema and its entries.
///
/// Invariants: `fields` is non-empty before the section is persisted;
/// when `allow_multiple` is false, `entries` holds at most one entry.
/// Sections themselves form an ordered list on the resume, so the
/// section carries its own `order` rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomSection {
    pub id: SectionId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "default_allow_multiple")]
    pub allow_multiple: bool,
    pub order: u32,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub entries: Vec<CustomSectionEntry>,
}

fn default_allow_multiple() -> bool {
    true
}

impl CustomSection {
    /// Create an empty section draft with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SectionId::new(),
            name: name.into(),
            icon: None,
            color: None,
            allow_multiple: true,
            order: 0,
            fields: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Set the icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set whether more than one entry is allowed
    pub fn with_allow_multiple(mut self, allow: bool) -> Self {
        self.allow_multiple = allow;
        self
    }

    /// Append a field definition
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a field definition by id.
    pub fn field(&self, id: &FieldId) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| &f.id == id)
    }

    /// Look up an entry by id.
    pub fn entry(&self, id: &EntryId) -> Option<&CustomSectionEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Look up an entry by id, mutably.
    pub fn entry_mut(&mut self, id: &EntryId) -> Option<&mut CustomSectionEntry> {
        self.entries.iter_mut().find(|e| &e.id == id)
    }

    /// Whether another entry may be added under the capacity rule.
    pub fn has_capacity(&self) -> bool {
        self.allow_multiple || self.entries.is_empty()
    }
}

impl Orderable for CustomSection {
    fn order_id(&self) -> String {
        self.id.to_string()
    }

    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}
