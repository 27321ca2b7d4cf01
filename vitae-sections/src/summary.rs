//! Display summaries for entry lists.
//!
//! A display convenience, not part of the persisted model: list rows
//! show a title and subtitle derived from the entry's values.

use serde::Serialize;
use vitae_fields::{FieldDefinition, FieldKind, FieldValue};

use crate::types::CustomSectionEntry;

/// Title and subtitle for one list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntrySummary {
    pub title: String,
    pub subtitle: String,
}

/// Derive a list-row summary from an entry.
///
/// The title comes from the first text-or-textarea field, the subtitle
/// from the first *other* text-or-date field, both in schema order.
/// Stale value keys (from deleted fields) never participate, and a
/// value whose shape no longer matches its field (a kind was edited
/// after entries existed) counts as empty.
pub fn derive_summary(entry: &CustomSectionEntry, fields: &[FieldDefinition]) -> EntrySummary {
    let title_field = fields
        .iter()
        .find(|f| matches!(f.kind, FieldKind::Text | FieldKind::Textarea));

    let subtitle_field = fields
        .iter()
        .filter(|f| Some(f.id) != title_field.map(|t| t.id))
        .find(|f| matches!(f.kind, FieldKind::Text | FieldKind::Date));

    EntrySummary {
        title: field_text(entry, title_field).unwrap_or_else(|| "Untitled".into()),
        subtitle: field_text(entry, subtitle_field).unwrap_or_else(|| "Entry".into()),
    }
}

fn field_text(entry: &CustomSectionEntry, field: Option<&FieldDefinition>) -> Option<String> {
    let value = entry.value(&field?.id)?;
    match value {
        FieldValue::Text(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
