//! GetEntry command

use serde::Deserialize;
use serde_json::Value;

use crate::context::SectionContext;
use crate::error::{Result, SectionError};
use crate::op::{async_trait, Execute};
use crate::summary::derive_summary;
use crate::types::{EntryId, SectionId};

/// Read one entry, with its derived list-row summary attached.
#[derive(Debug, Deserialize)]
pub struct GetEntry {
    /// The section owning the entry
    pub section_id: SectionId,
    /// The entry to read
    pub entry_id: EntryId,
}

impl GetEntry {
    /// Create a new GetEntry command
    pub fn new(section_id: SectionId, entry_id: EntryId) -> Self {
        Self {
            section_id,
            entry_id,
        }
    }
}

#[async_trait]
impl Execute<SectionContext, SectionError> for GetEntry {
    async fn execute(&self, ctx: &SectionContext) -> Result<Value> {
        let section = ctx.read_section(&self.section_id)?;
        let entry = section
            .entry(&self.entry_id)
            .ok_or_else(|| SectionError::entry_not_found(self.entry_id))?;

        let mut value = serde_json::to_value(entry)?;
        value["summary"] = serde_json::to_value(derive_summary(entry, &section.fields))?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::AddEntry;
    use crate::persistence::MemoryPersistence;
    use crate::section::AddSection;
    use crate::FieldKind;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_entry_with_summary() {
        let ctx = SectionContext::new(Arc::new(MemoryPersistence::new()));
        let section = AddSection::new("Certifications")
            .with_field("Name", FieldKind::Text)
            .execute(&ctx)
            .await
            .unwrap();
        let section_id: SectionId = section["id"].as_str().unwrap().parse().unwrap();
        let field = serde_json::from_value(section["fields"][0]["id"].clone()).unwrap();

        let entry = AddEntry::new(section_id)
            .with_value(field, json!("CKA"))
            .execute(&ctx)
            .await
            .unwrap();
        let entry_id: EntryId = entry["id"].as_str().unwrap().parse().unwrap();

        let result = GetEntry::new(section_id, entry_id)
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(result["summary"]["title"], "CKA");
        assert_eq!(result["summary"]["subtitle"], "Entry");
    }

    #[tokio::test]
    async fn test_get_missing_entry() {
        let ctx = SectionContext::new(Arc::new(MemoryPersistence::new()));
        let section = AddSection::new("Certifications")
            .with_field("Name", FieldKind::Text)
            .execute(&ctx)
            .await
            .unwrap();
        let section_id: SectionId = section["id"].as_str().unwrap().parse().unwrap();

        let err = GetEntry::new(section_id, EntryId::new())
            .execute(&ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, SectionError::EntryNotFound { .. }));
    }
}
