//! GetSection command

use serde::Deserialize;
use serde_json::Value;

use crate::context::SectionContext;
use crate::error::{Result, SectionError};
use crate::op::{async_trait, Execute};
use crate::types::SectionId;

/// Read one custom section, entries sorted by rank.
#[derive(Debug, Deserialize)]
pub struct GetSection {
    /// The section to read
    pub id: SectionId,
}

impl GetSection {
    /// Create a new GetSection command
    pub fn new(id: SectionId) -> Self {
        Self { id }
    }
}

#[async_trait]
impl Execute<SectionContext, SectionError> for GetSection {
    async fn execute(&self, ctx: &SectionContext) -> Result<Value> {
        let mut section = ctx.read_section(&self.id)?;
        section.entries.sort_by_key(|e| e.order);
        Ok(serde_json::to_value(&section)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryPersistence;
    use crate::section::AddSection;
    use crate::FieldKind;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_section() {
        let ctx = SectionContext::new(Arc::new(MemoryPersistence::new()));
        let result = AddSection::new("Languages")
            .with_field("Language", FieldKind::Text)
            .execute(&ctx)
            .await
            .unwrap();
        let id: SectionId = result["id"].as_str().unwrap().parse().unwrap();

        let fetched = GetSection::new(id).execute(&ctx).await.unwrap();
        assert_eq!(fetched["name"], "Languages");
    }

    #[tokio::test]
    async fn test_get_missing_section() {
        let ctx = SectionContext::new(Arc::new(MemoryPersistence::new()));
        let err = GetSection::new(SectionId::new())
            .execute(&ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, SectionError::SectionNotFound { .. }));
    }
}
