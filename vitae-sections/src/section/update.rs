//! UpdateSection command

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use vitae_fields::{validate_definition, FieldDefinition, FieldId, FieldKind};

use crate::context::SectionContext;
use crate::error::{Result, SectionError};
use crate::op::{async_trait, Execute};
use crate::types::SectionId;

/// Update a custom section's metadata or schema.
///
/// Removing a field leaves existing entry values in place as stale
/// keys: entries referencing other fields are never touched, and
/// renderers ignore keys with no matching field.
#[derive(Debug, Deserialize)]
pub struct UpdateSection {
    /// The section to update
    pub id: SectionId,
    /// New display name
    pub name: Option<String>,
    /// New icon slug
    pub icon: Option<String>,
    /// New accent color
    pub color: Option<String>,
    /// New capacity rule
    pub allow_multiple: Option<bool>,
    /// Fields to append to the schema
    #[serde(default)]
    pub add_fields: Vec<FieldDefinition>,
    /// Fields to remove from the schema
    #[serde(default)]
    pub remove_fields: Vec<FieldId>,
}

impl UpdateSection {
    /// Create a new UpdateSection command
    pub fn new(id: SectionId) -> Self {
        Self {
            id,
            name: None,
            icon: None,
            color: None,
            allow_multiple: None,
            add_fields: Vec::new(),
            remove_fields: Vec::new(),
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
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

    /// Set the capacity rule
    pub fn with_allow_multiple(mut self, allow: bool) -> Self {
        self.allow_multiple = Some(allow);
        self
    }

    /// Append a field to the schema
    pub fn add_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.add_fields.push(FieldDefinition::new(name, kind));
        self
    }

    /// Remove a field from the schema
    pub fn remove_field(mut self, id: FieldId) -> Self {
        self.remove_fields.push(id);
        self
    }
}

#[async_trait]
impl Execute<SectionContext, SectionError> for UpdateSection {
    async fn execute(&self, ctx: &SectionContext) -> Result<Value> {
        for field in &self.add_fields {
            validate_definition(field)?;
        }

        // Apply under the lock; keep the previous section for rollback
        let (previous, updated) = ctx.with_state_mut(|resume| {
            let section = resume
                .section_mut(&self.id)
                .ok_or_else(|| SectionError::section_not_found(self.id))?;
            let previous = section.clone();

            if let Some(allow) = self.allow_multiple {
                if !allow && section.entries.len() > 1 {
                    return Err(SectionError::Capacity {
                        section: section.name.clone(),
                    });
                }
                section.allow_multiple = allow;
            }
            if let Some(ref name) = self.name {
                section.name = name.clone();
            }
            if let Some(ref icon) = self.icon {
                section.icon = Some(icon.clone());
            }
            if let Some(ref color) = self.color {
                section.color = Some(color.clone());
            }
            section.fields.extend(self.add_fields.iter().cloned());
            section.fields.retain(|f| !self.remove_fields.contains(&f.id));

            if section.fields.is_empty() {
                // Undo before surfacing: the invariant holds even on
                // the local failure path
                let name = section.name.clone();
                *section = previous;
                return Err(SectionError::EmptySchema { section: name });
            }

            Ok((previous, section.clone()))
        })?;

        let payload = serde_json::to_value(&updated)?;
        let result = ctx
            .persistence()
            .update_entry(&self.id.to_string(), payload)
            .await;

        if let Err(err) = result {
            warn!(section = %self.id, error = %err, "section update failed, rolling back");
            ctx.with_state_mut(|resume| {
                if let Some(section) = resume.section_mut(&self.id) {
                    *section = previous;
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
    use crate::op::Execute;
    use crate::persistence::MemoryPersistence;
    use crate::section::AddSection;
    use crate::types::CustomSectionEntry;
    use std::sync::Arc;

    async fn setup() -> (Arc<MemoryPersistence>, SectionContext, SectionId) {
        let store = Arc::new(MemoryPersistence::new());
        let ctx = SectionContext::new(store.clone());

        let result = AddSection::new("Languages")
            .with_field("Language", FieldKind::Text)
            .with_field("Level", FieldKind::Text)
            .execute(&ctx)
            .await
            .unwrap();
        let id = result["id"].as_str().unwrap().parse().unwrap();

        (store, ctx, id)
    }

    #[tokio::test]
    async fn test_rename_section() {
        let (_store, ctx, id) = setup().await;

        let result = UpdateSection::new(id)
            .with_name("Spoken Languages")
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(result["name"], "Spoken Languages");
        assert_eq!(ctx.read_section(&id).unwrap().name, "Spoken Languages");
    }

    #[tokio::test]
    async fn test_remove_field_keeps_other_values() {
        let (_store, ctx, id) = setup().await;

        let (language_field, level_field) = ctx.with_state(|resume| {
            let section = resume.section(&id).unwrap();
            (section.fields[0].id, section.fields[1].id)
        });

        // Seed an entry with values for both fields
        ctx.with_state_mut(|resume| {
            let section = resume.section_mut(&id).unwrap();
            let mut entry = CustomSectionEntry::empty(&section.fields);
            entry
                .values
                .insert(language_field, crate::FieldValue::Text("French".into()));
            entry
                .values
                .insert(level_field, crate::FieldValue::Text("Fluent".into()));
            section.entries.push(entry);
        });

        UpdateSection::new(id)
            .remove_field(level_field)
            .execute(&ctx)
            .await
            .unwrap();

        let section = ctx.read_section(&id).unwrap();
        assert_eq!(section.fields.len(), 1);
        // Remaining value intact; stale key tolerated
        assert_eq!(
            section.entries[0].value(&language_field),
            Some(&crate::FieldValue::Text("French".into()))
        );
        assert!(section.entries[0].value(&level_field).is_some());
    }

    #[tokio::test]
    async fn test_cannot_remove_last_field() {
        let (_store, ctx, id) = setup().await;
        let fields: Vec<_> = ctx
            .read_section(&id)
            .unwrap()
            .fields
            .iter()
            .map(|f| f.id)
            .collect();

        let mut cmd = UpdateSection::new(id);
        for field in fields {
            cmd = cmd.remove_field(field);
        }
        let err = cmd.execute(&ctx).await.unwrap_err();

        assert!(matches!(err, SectionError::EmptySchema { .. }));
        assert_eq!(ctx.read_section(&id).unwrap().fields.len(), 2);
    }

    #[tokio::test]
    async fn test_shrink_capacity_with_multiple_entries_rejected() {
        let (_store, ctx, id) = setup().await;

        ctx.with_state_mut(|resume| {
            let section = resume.section_mut(&id).unwrap();
            let fields = section.fields.clone();
            section.entries.push(CustomSectionEntry::empty(&fields));
            section.entries.push(CustomSectionEntry::empty(&fields));
        });

        let err = UpdateSection::new(id)
            .with_allow_multiple(false)
            .execute(&ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, SectionError::Capacity { .. }));
        assert!(ctx.read_section(&id).unwrap().allow_multiple);
    }

    #[tokio::test]
    async fn test_persistence_failure_rolls_back() {
        let (store, ctx, id) = setup().await;
        store.fail_next("boom");

        let err = UpdateSection::new(id)
            .with_name("Changed")
            .execute(&ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, SectionError::Persistence { .. }));
        assert_eq!(ctx.read_section(&id).unwrap().name, "Languages");
    }

    #[tokio::test]
    async fn test_unknown_section() {
        let (_store, ctx, _id) = setup().await;

        let err = UpdateSection::new(SectionId::new())
            .with_name("X")
            .execute(&ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, SectionError::SectionNotFound { .. }));
    }
}
