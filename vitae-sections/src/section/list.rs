//! ListSections command

use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::SectionContext;
use crate::error::{Result, SectionError};
use crate::op::{async_trait, Execute};

/// List custom sections in rank order, with entry counts for the
/// section picker.
#[derive(Debug, Default, Deserialize)]
pub struct ListSections;

impl ListSections {
    /// Create a new ListSections command
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Execute<SectionContext, SectionError> for ListSections {
    async fn execute(&self, ctx: &SectionContext) -> Result<Value> {
        let rows = ctx.with_state(|resume| {
            let mut sections = resume.custom.clone();
            sections.sort_by_key(|s| s.order);
            sections
                .iter()
                .map(|s| {
                    json!({
                        "id": s.id,
                        "name": s.name,
                        "icon": s.icon,
                        "color": s.color,
                        "order": s.order,
                        "allow_multiple": s.allow_multiple,
                        "entry_count": s.entries.len(),
                    })
                })
                .collect::<Vec<_>>()
        });
        Ok(Value::Array(rows))
    }
}
