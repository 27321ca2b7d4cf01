//! RemoveEntry command

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::context::SectionContext;
use crate::error::{Result, SectionError};
use crate::op::{async_trait, Execute};
use crate::order;
use crate::types::{CustomSectionEntry, EntryId, SectionId, SectionKind};

/// Delete an entry and compact the section's ranks.
///
/// Compaction runs as part of the same locked mutation as the
/// deletion, not as an afterthought; otherwise a subsequent reorder
/// would silently reintroduce the gap.
#[derive(Debug, Deserialize)]
pub struct RemoveEntry {
    /// The section owning the entry
    pub section_id: SectionId,
    /// The entry to delete
    pub entry_id: EntryId,
}

impl RemoveEntry {
    /// Create a new RemoveEntry command
    pub fn new(section_id: SectionId, entry_id: EntryId) -> Self {
        Self {
            section_id,
            entry_id,
        }
    }

    fn restore(&self, ctx: &SectionContext, snapshot: Vec<CustomSectionEntry>) {
        ctx.with_state_mut(|resume| {
            if let Some(section) = resume.section_mut(&self.section_id) {
                section.entries = snapshot;
            }
        });
    }
}

#[async_trait]
impl Execute<SectionContext, SectionError> for RemoveEntry {
    async fn execute(&self, ctx: &SectionContext) -> Result<Value> {
        let (snapshot, removed, deltas) = ctx.with_state_mut(|resume| {
            let section = resume
                .section_mut(&self.section_id)
                .ok_or_else(|| SectionError::section_not_found(self.section_id))?;
            let removed = section
                .entry(&self.entry_id)
                .cloned()
                .ok_or_else(|| SectionError::entry_not_found(self.entry_id))?;
            let snapshot = section.entries.clone();

            section.entries.retain(|e| e.id != self.entry_id);
            order::compact(&mut section.entries);
            let deltas = order::changed_ranks(&snapshot, &section.entries);

            Ok::<_, SectionError>((snapshot, removed, deltas))
        })?;

        // Delete, then bring the stored ranks in step. Either failure
        // rolls the local list back; a compaction failure additionally
        // re-creates the already-deleted entry so store and local state
        // agree again.
        let kind = SectionKind::CustomEntries(self.section_id);
        if let Err(err) = ctx
            .persistence()
            .delete_entry(&self.entry_id.to_string())
            .await
        {
            warn!(entry = %self.entry_id, error = %err, "entry delete failed, rolling back");
            self.restore(ctx, snapshot);
            return Err(err);
        }

        if !deltas.is_empty() {
            if let Err(err) = ctx.persistence().reorder(&kind, &deltas).await {
                warn!(entry = %self.entry_id, error = %err, "rank compaction failed, reverting the delete");
                let payload = serde_json::to_value(&removed)?;
                if let Err(recreate) = ctx
                    .persistence()
                    .create_entry(&kind, &self.entry_id.to_string(), payload)
                    .await
                {
                    warn!(entry = %self.entry_id, error = %recreate, "re-create of the deleted entry failed; a retry heals the stored ranks");
                }
                self.restore(ctx, snapshot);
                return Err(err);
            }
        }

        Ok(serde_json::to_value(&removed)?)
    }
}
