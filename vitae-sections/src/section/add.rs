//! AddSection command

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use vitae_fields::{validate_definition, FieldDefinition, FieldKind};

use crate::catalog::{self, SectionTemplate};
use crate::context::SectionContext;
use crate::error::{Result, SectionError};
use crate::op::{async_trait, Execute};
use crate::order::{self, Orderable};
use crate::types::{CustomSection, SectionKind};

/// Create a new custom section, from scratch or from a catalog
/// template, and append it to the resume's section list.
#[derive(Debug, Deserialize)]
pub struct AddSection {
    /// Display name
    pub name: String,
    /// Icon slug
    pub icon: Option<String>,
    /// Accent color
    pub color: Option<String>,
    /// Whether the section may hold more than one entry
    #[serde(default = "default_allow_multiple")]
    pub allow_multiple: bool,
    /// The field schema; must be non-empty
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

fn default_allow_multiple() -> bool {
    true
}

impl AddSection {
    /// Create an AddSection command for a from-scratch section
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: None,
            color: None,
            allow_multiple: true,
            fields: Vec::new(),
        }
    }

    /// Create an AddSection command seeded from a catalog template.
    /// Field ids are freshly generated and every field starts optional.
    pub fn from_template(template: &SectionTemplate) -> Self {
        let draft = catalog::instantiate(template);
        Self {
            name: draft.name,
            icon: draft.icon,
            color: draft.color,
            allow_multiple: draft.allow_multiple,
            fields: draft.fields,
        }
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

    /// Set whether more than one entry is allowed
    pub fn with_allow_multiple(mut self, allow: bool) -> Self {
        self.allow_multiple = allow;
        self
    }

    /// Append a field to the schema
    pub fn with_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDefinition::new(name, kind));
        self
    }
}

#[async_trait]
impl Execute<SectionContext, SectionError> for AddSection {
    async fn execute(&self, ctx: &SectionContext) -> Result<Value> {
        // Schema must be valid before anything is stored
        if self.fields.is_empty() {
            return Err(SectionError::EmptySchema {
                section: self.name.clone(),
            });
        }
        for field in &self.fields {
            validate_definition(field)?;
        }

        let mut section = CustomSection::new(&self.name);
        section.icon = self.icon.clone();
        section.color = self.color.clone();
        section.allow_multiple = self.allow_multiple;
        section.fields = self.fields.clone();
        let section_id = section.id;

        // Rank assignment and append happen under one lock; two rapid
        // creates cannot read the same stale max.
        ctx.with_state_mut(|resume| {
            section.set_order(order::next_order(&resume.custom));
            resume.custom.push(section.clone());
        });

        let payload = serde_json::to_value(&section)?;
        let result = ctx
            .persistence()
            .create_entry(&SectionKind::CustomSections, &section_id.to_string(), payload)
            .await;

        if let Err(err) = result {
            warn!(section = %section_id, error = %err, "section create failed, rolling back");
            ctx.with_state_mut(|resume| resume.custom.retain(|s| s.id != section_id));
            return Err(err);
        }

        Ok(serde_json::to_value(&section)?)
    }
}
