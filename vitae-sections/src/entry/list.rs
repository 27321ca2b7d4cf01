//! ListEntries command

use serde::Deserialize;
use serde_json::Value;

use crate::context::SectionContext;
use crate::error::{Result, SectionError};
use crate::op::{async_trait, Execute};
use crate::summary::derive_summary;
use crate::types::SectionId;

/// List a section's entries in rank order, each with its derived
/// list-row summary.
#[derive(Debug, Deserialize)]
pub struct ListEntries {
    /// The section to list
    pub section_id: SectionId,
}

impl ListEntries {
    /// Create a new ListEntries command
    pub fn new(section_id: SectionId) -> Self {
        Self { section_id }
    }
}

#[async_trait]
impl Execute<SectionContext, SectionError> for ListEntries {
    async fn execute(&self, ctx: &SectionContext) -> Result<Value> {
        let section = ctx.read_section(&self.section_id)?;

        let mut entries = section.entries.clone();
        entries.sort_by_key(|e| e.order);

        let mut rows = Vec::with_capacity(entries.len());
        for entry in &entries {
            let mut row = serde_json::to_value(entry)?;
            row["summary"] = serde_json::to_value(derive_summary(entry, &section.fields))?;
            rows.push(row);
        }
        Ok(Value::Array(rows))
    }
}
