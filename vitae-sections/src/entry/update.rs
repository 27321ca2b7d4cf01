//! UpdateEntry command

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use vitae_fields::{coerce_value, FieldId};

use crate::context::SectionContext;
use crate::error::{Result, SectionError};
use crate::op::{async_trait, Execute};
use crate::types::{EntryId, SectionId};

/// Replace an entry's value bag. Never changes the entry's rank.
#[derive(Debug, Deserialize)]
pub struct UpdateEntry {
    /// The section owning the entry
    pub section_id: SectionId,
    /// The entry to update
    pub entry_id: EntryId,
    /// Raw submitted values, keyed by field id
    #[serde(default)]
    pub values: HashMap<FieldId, Value>,
}

impl UpdateEntry {
    /// Create a new UpdateEntry command
    pub fn new(section_id: SectionId, entry_id: EntryId) -> Self {
        Self {
            section_id,
            entry_id,
            values: HashMap::new(),
        }
    }

    /// Set one submitted raw value
    pub fn with_value(mut self, field: FieldId, raw: Value) -> Self {
        self.values.insert(field, raw);
        self
    }
}

#[async_trait]
impl Execute<SectionContext, SectionError> for UpdateEntry {
    async fn execute(&self, ctx: &SectionContext) -> Result<Value> {
        let (previous_values, updated) = ctx.with_state_mut(|resume| {
            let section = resume
                .section_mut(&self.section_id)
                .ok_or_else(|| SectionError::section_not_found(self.section_id))?;

            // Coerce against the current schema before touching the
            // entry; an incompatible value leaves it unchanged
            let mut coerced = Vec::with_capacity(self.values.len());
            for (field_id, raw) in &self.values {
                if let Some(field) = section.field(field_id) {
                    coerced.push((*field_id, coerce_value(field.kind, raw.clone())?));
                }
            }

            let fields = section.fields.clone();
            let entry = section
                .entry_mut(&self.entry_id)
                .ok_or_else(|| SectionError::entry_not_found(self.entry_id))?;
            let previous_values = entry.values.clone();

            // Replace the bag: zero values for the current schema,
            // submitted values overlaid. Rank is untouched.
            entry.values = fields.iter().map(|f| (f.id, f.kind.zero_value())).collect();
            for (field_id, value) in coerced {
                entry.values.insert(field_id, value);
            }

            Ok::<_, SectionError>((previous_values, entry.clone()))
        })?;

        let payload = serde_json::to_value(&updated)?;
        let result = ctx
            .persistence()
            .update_entry(&self.entry_id.to_string(), payload)
            .await;

        if let Err(err) = result {
            warn!(entry = %self.entry_id, error = %err, "entry update failed, rolling back");
            ctx.with_state_mut(|resume| {
                if let Some(section) = resume.section_mut(&self.section_id) {
                    if let Some(entry) = section.entry_mut(&self.entry_id) {
                        entry.values = previous_values;
                    }
                }
            });
            return Err(err);
        }

        Ok(serde_json::to_value(&updated)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::AddEntry;
    use crate::persistence::MemoryPersistence;
    use crate::section::AddSection;
    use crate::{FieldKind, FieldValue};
    use serde_json::json;
    use std::sync::Arc;

    async fn setup() -> (
        Arc<MemoryPersistence>,
        SectionContext,
        SectionId,
        EntryId,
        FieldId,
    ) {
        let store = Arc::new(MemoryPersistence::new());
        let ctx = SectionContext::new(store.clone());

        let result = AddSection::new("Certifications")
            .with_field("Name", FieldKind::Text)
            .execute(&ctx)
            .await
            .unwrap();
        let section_id: SectionId = result["id"].as_str().unwrap().parse().unwrap();
        let field: FieldId = serde_json::from_value(result["fields"][0]["id"].clone()).unwrap();

        let entry = AddEntry::new(section_id)
            .with_value(field, json!("CKA"))
            .execute(&ctx)
            .await
            .unwrap();
        let entry_id: EntryId = entry["id"].as_str().unwrap().parse().unwrap();

        (store, ctx, section_id, entry_id, field)
    }

    #[tokio::test]
    async fn test_update_replaces_values_keeps_order() {
        let (_store, ctx, section_id, entry_id, field) = setup().await;

        let result = UpdateEntry::new(section_id, entry_id)
            .with_value(field, json!("CKS"))
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(result["order"], 0);
        let section = ctx.read_section(&section_id).unwrap();
        assert_eq!(
            section.entries[0].value(&field),
            Some(&FieldValue::Text("CKS".into()))
        );
    }

    #[tokio::test]
    async fn test_update_missing_entry() {
        let (_store, ctx, section_id, _entry_id, field) = setup().await;

        let err = UpdateEntry::new(section_id, EntryId::new())
            .with_value(field, json!("X"))
            .execute(&ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, SectionError::EntryNotFound { .. }));
    }

    #[tokio::test]
    async fn test_incompatible_value_leaves_entry_unchanged() {
        let (store, ctx, section_id, entry_id, field) = setup().await;
        let calls_before = store.calls().len();

        let err = UpdateEntry::new(section_id, entry_id)
            .with_value(field, json!(42))
            .execute(&ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, SectionError::Fields(_)));
        let section = ctx.read_section(&section_id).unwrap();
        assert_eq!(
            section.entries[0].value(&field),
            Some(&FieldValue::Text("CKA".into()))
        );
        assert_eq!(store.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn test_persistence_failure_restores_previous_values() {
        let (store, ctx, section_id, entry_id, field) = setup().await;
        store.fail_next("boom");

        let err = UpdateEntry::new(section_id, entry_id)
            .with_value(field, json!("CKS"))
            .execute(&ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, SectionError::Persistence { .. }));
        let section = ctx.read_section(&section_id).unwrap();
        assert_eq!(
            section.entries[0].value(&field),
            Some(&FieldValue::Text("CKA".into()))
        );
    }
}
