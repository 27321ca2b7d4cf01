//! Custom section entries: a value bag keyed by field id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use vitae_fields::{FieldDefinition, FieldId, FieldValue};

use super::ids::EntryId;
use crate::order::Orderable;

/// One entry of a custom section.
///
/// `values` maps a field definition's id to a value conforming to that
/// field's kind. Keys referencing a field that has since been deleted
/// are tolerated; renderers ignore them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomSectionEntry {
    pub id: EntryId,
    pub order: u32,
    #[serde(default)]
    pub values: HashMap<FieldId, FieldValue>,
}

impl CustomSectionEntry {
    /// Create an entry with `values` seeded to the zero value of each
    /// field's kind and a freshly generated id. Order is assigned by
    /// the store when the entry is appended.
    pub fn empty(fields: &[FieldDefinition]) -> Self {
        let values = fields
            .iter()
            .map(|f| (f.id, f.kind.zero_value()))
            .collect();
        Self {
            id: EntryId::new(),
            order: 0,
            values,
        }
    }

    /// The value stored for a field, if any.
    pub fn value(&self, field: &FieldId) -> Option<&FieldValue> {
        self.values.get(field)
    }
}

impl Orderable for CustomSectionEntry {
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

#[cfg(test)]
mod tests {
    use super::*;
    use vitae_fields::FieldKind;

    #[test]
    fn empty_entry_seeds_zero_values() {
        let fields = vec![
            FieldDefinition::new("Name", FieldKind::Text),
            FieldDefinition::new("Notes", FieldKind::RichText),
        ];
        let entry = CustomSectionEntry::empty(&fields);

        assert_eq!(entry.values.len(), 2);
        for field in &fields {
            assert!(entry.value(&field.id).unwrap().is_empty());
        }
        assert!(matches!(
            entry.value(&fields[1].id),
            Some(FieldValue::Rich(_))
        ));
    }

    #[test]
    fn empty_entries_get_fresh_ids() {
        let fields = vec![FieldDefinition::new("Name", FieldKind::Text)];
        let a = CustomSectionEntry::empty(&fields);
        let b = CustomSectionEntry::empty(&fields);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn entry_json_round_trip() {
        let fields = vec![FieldDefinition::new("Name", FieldKind::Text)];
        let mut entry = CustomSectionEntry::empty(&fields);
        entry
            .values
            .insert(fields[0].id, FieldValue::Text("Rust".into()));

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: CustomSectionEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, parsed);
    }
}
