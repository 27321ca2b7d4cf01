//! RemoveSection command

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::context::SectionContext;
use crate::error::{Result, SectionError};
use crate::op::{async_trait, Execute};
use crate::order;
use crate::types::{SectionId, SectionKind};

/// Delete a custom section and close the rank gap it leaves.
///
/// Deletion and compaction happen in the same locked mutation; a
/// subsequent reorder never observes a gapped list.
#[derive(Debug, Deserialize)]
pub struct RemoveSection {
    /// The section to delete
    pub id: SectionId,
}

impl RemoveSection {
    /// Create a new RemoveSection command
    pub fn new(id: SectionId) -> Self {
        Self { id }
    }
}

#[async_trait]
impl Execute<SectionContext, SectionError> for RemoveSection {
    async fn execute(&self, ctx: &SectionContext) -> Result<Value> {
        let (snapshot, removed, deltas) = ctx.with_state_mut(|resume| {
            let removed = resume
                .section(&self.id)
                .cloned()
                .ok_or_else(|| SectionError::section_not_found(self.id))?;
            let snapshot = resume.custom.clone();

            resume.custom.retain(|s| s.id != self.id);
            order::compact(&mut resume.custom);
            let deltas = order::changed_ranks(&snapshot, &resume.custom);

            Ok::<_, SectionError>((snapshot, removed, deltas))
        })?;

        if let Err(err) = ctx.persistence().delete_entry(&self.id.to_string()).await {
            warn!(section = %self.id, error = %err, "section delete failed, rolling back");
            ctx.with_state_mut(|resume| resume.custom = snapshot);
            return Err(err);
        }

        if !deltas.is_empty() {
            if let Err(err) = ctx
                .persistence()
                .reorder(&SectionKind::CustomSections, &deltas)
                .await
            {
                // The delete already landed; put the section back so
                // the restored local list matches the store again
                warn!(section = %self.id, error = %err, "rank compaction failed, reverting the delete");
                let payload = serde_json::to_value(&removed)?;
                if let Err(recreate) = ctx
                    .persistence()
                    .create_entry(&SectionKind::CustomSections, &self.id.to_string(), payload)
                    .await
                {
                    warn!(section = %self.id, error = %recreate, "re-create of the deleted section failed; a retry heals the stored ranks");
                }
                ctx.with_state_mut(|resume| resume.custom = snapshot);
                return Err(err);
            }
        }

        Ok(serde_json::to_value(&removed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Orderable;
    use crate::persistence::MemoryPersistence;
    use crate::section::AddSection;
    use crate::FieldKind;
    use std::sync::Arc;

    async fn setup_three() -> (Arc<MemoryPersistence>, SectionContext, Vec<SectionId>) {
        let store = Arc::new(MemoryPersistence::new());
        let ctx = SectionContext::new(store.clone());

        let mut ids = Vec::new();
        for name in ["One", "Two", "Three"] {
            let result = AddSection::new(name)
                .with_field("Value", FieldKind::Text)
                .execute(&ctx)
                .await
                .unwrap();
            ids.push(result["id"].as_str().unwrap().parse().unwrap());
        }
        (store, ctx, ids)
    }

    #[tokio::test]
    async fn test_remove_compacts_ranks() {
        let (_store, ctx, ids) = setup_three().await;

        RemoveSection::new(ids[1]).execute(&ctx).await.unwrap();

        let resume = ctx.read_resume();
        assert_eq!(resume.custom.len(), 2);
        assert!(order::is_dense(&resume.custom));
        assert_eq!(resume.custom[0].name, "One");
        assert_eq!(resume.custom[1].name, "Three");
        assert_eq!(resume.custom[1].order(), 1);
    }

    #[tokio::test]
    async fn test_remove_unknown_section() {
        let (_store, ctx, _ids) = setup_three().await;

        let err = RemoveSection::new(SectionId::new())
            .execute(&ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, SectionError::SectionNotFound { .. }));
    }

    #[tokio::test]
    async fn test_persistence_failure_rolls_back() {
        let (store, ctx, ids) = setup_three().await;
        let before = ctx.read_resume().custom;
        store.fail_next("boom");

        let err = RemoveSection::new(ids[1]).execute(&ctx).await.unwrap_err();

        assert!(matches!(err, SectionError::Persistence { .. }));
        assert_eq!(ctx.read_resume().custom, before);
    }

    #[tokio::test]
    async fn test_failed_compaction_recreates_the_deleted_section() {
        let (store, ctx, ids) = setup_three().await;
        let before = ctx.read_resume().custom;

        store.fail_on("reorder", "network down");
        let err = RemoveSection::new(ids[0]).execute(&ctx).await.unwrap_err();
        assert!(matches!(err, SectionError::Persistence { .. }));

        // Local list restored, and the store holds the section again
        assert_eq!(ctx.read_resume().custom, before);
        assert!(store.entry(&ids[0].to_string()).is_some());
    }
}
