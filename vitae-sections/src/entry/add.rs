//! AddEntry command

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use vitae_fields::{coerce_value, FieldId};

use crate::context::SectionContext;
use crate::error::{Result, SectionError};
use crate::op::{async_trait, Execute};
use crate::order;
use crate::types::{CustomSectionEntry, SectionId, SectionKind};

/// Append a new entry to a custom section.
///
/// Values are coerced against the section's schema before anything is
/// stored; the entry starts from the zero value of every field, with
/// submitted values overlaid on top. Keys that match no current field
/// are ignored.
#[derive(Debug, Deserialize)]
pub struct AddEntry {
    /// The section to add to
    pub section_id: SectionId,
    /// Raw submitted values, keyed by field id
    #[serde(default)]
    pub values: HashMap<FieldId, Value>,
}

impl AddEntry {
    /// Create a new AddEntry command with all-zero values
    pub fn new(section_id: SectionId) -> Self {
        Self {
            section_id,
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
impl Execute<SectionContext, SectionError> for AddEntry {
    async fn execute(&self, ctx: &SectionContext) -> Result<Value> {
        // Coercion, capacity check, rank assignment, and append happen
        // in one critical section
        let entry = ctx.with_state_mut(|resume| {
            let section = resume
                .section_mut(&self.section_id)
                .ok_or_else(|| SectionError::section_not_found(self.section_id))?;

            if !section.has_capacity() {
                return Err(SectionError::Capacity {
                    section: section.name.clone(),
                });
            }

            let mut entry = CustomSectionEntry::empty(&section.fields);
            for (field_id, raw) in &self.values {
                // Unknown keys are tolerated at the boundary; only
                // current schema fields take values
                if let Some(field) = section.field(field_id) {
                    entry
                        .values
                        .insert(*field_id, coerce_value(field.kind, raw.clone())?);
                }
            }

            entry.order = order::next_order(&section.entries);
            section.entries.push(entry.clone());
            Ok(entry)
        })?;

        let kind = SectionKind::CustomEntries(self.section_id);
        let payload = serde_json::to_value(&entry)?;
        let result = ctx
            .persistence()
            .create_entry(&kind, &entry.id.to_string(), payload)
            .await;

        if let Err(err) = result {
            warn!(entry = %entry.id, error = %err, "entry create failed, rolling back");
            // The entry was appended at the tail, so removing it keeps
            // the remaining ranks dense
            ctx.with_state_mut(|resume| {
                if let Some(section) = resume.section_mut(&self.section_id) {
                    section.entries.retain(|e| e.id != entry.id);
                }
            });
            return Err(err);
        }

        Ok(serde_json::to_value(&entry)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryPersistence;
    use crate::section::AddSection;
    use crate::{FieldKind, FieldValue};
    use serde_json::json;
    use std::sync::Arc;

    async fn setup(
        allow_multiple: bool,
    ) -> (Arc<MemoryPersistence>, SectionContext, SectionId, FieldId) {
        let store = Arc::new(MemoryPersistence::new());
        let ctx = SectionContext::new(store.clone());

        let result = AddSection::new("Certifications")
            .with_allow_multiple(allow_multiple)
            .with_field("Name", FieldKind::Text)
            .with_field("Issue Date", FieldKind::Date)
            .execute(&ctx)
            .await
            .unwrap();
        let id: SectionId = result["id"].as_str().unwrap().parse().unwrap();
        let field: FieldId =
            serde_json::from_value(result["fields"][0]["id"].clone()).unwrap();

        (store, ctx, id, field)
    }

    #[tokio::test]
    async fn test_add_entry_with_values() {
        let (_store, ctx, section_id, name_field) = setup(true).await;

        let result = AddEntry::new(section_id)
            .with_value(name_field, json!("  CKA  "))
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(result["order"], 0);
        let section = ctx.read_section(&section_id).unwrap();
        assert_eq!(
            section.entries[0].value(&name_field),
            Some(&FieldValue::Text("CKA".into()))
        );
    }

    #[tokio::test]
    async fn test_orders_are_sequential() {
        let (_store, ctx, section_id, _field) = setup(true).await;

        for expected in 0..3u32 {
            let result = AddEntry::new(section_id).execute(&ctx).await.unwrap();
            assert_eq!(result["order"], expected);
        }

        let section = ctx.read_section(&section_id).unwrap();
        assert!(order::is_dense(&section.entries));
    }

    #[tokio::test]
    async fn test_capacity_error_leaves_existing_entry_untouched() {
        let (store, ctx, section_id, _field) = setup(false).await;

        let first = AddEntry::new(section_id).execute(&ctx).await.unwrap();
        let calls_before = store.calls().len();

        let err = AddEntry::new(section_id).execute(&ctx).await.unwrap_err();
        assert!(matches!(err, SectionError::Capacity { .. }));

        let section = ctx.read_section(&section_id).unwrap();
        assert_eq!(section.entries.len(), 1);
        assert_eq!(section.entries[0].id.to_string(), first["id"]);
        assert_eq!(section.entries[0].order, 0);
        // The rejected add never reached persistence
        assert_eq!(store.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn test_incompatible_value_rejected_before_store() {
        let (store, ctx, section_id, name_field) = setup(true).await;
        let calls_before = store.calls().len();

        let err = AddEntry::new(section_id)
            .with_value(name_field, json!({"doc": []}))
            .execute(&ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, SectionError::Fields(_)));
        assert!(ctx.read_section(&section_id).unwrap().entries.is_empty());
        assert_eq!(store.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn test_unknown_value_keys_ignored() {
        let (_store, ctx, section_id, _field) = setup(true).await;

        let result = AddEntry::new(section_id)
            .with_value(FieldId::new(), json!("orphan"))
            .execute(&ctx)
            .await
            .unwrap();

        // Only the schema's two zero-seeded fields are present
        assert_eq!(result["values"].as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_persistence_failure_rolls_back() {
        let (store, ctx, section_id, _field) = setup(true).await;
        AddEntry::new(section_id).execute(&ctx).await.unwrap();
        store.fail_next("boom");

        let err = AddEntry::new(section_id).execute(&ctx).await.unwrap_err();

        assert!(matches!(err, SectionError::Persistence { .. }));
        let section = ctx.read_section(&section_id).unwrap();
        assert_eq!(section.entries.len(), 1);
        assert!(order::is_dense(&section.entries));
    }
}
