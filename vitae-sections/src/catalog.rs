//! Section template catalog: read-only starter schemas.
//!
//! Templates suggest structure, they do not mandate it: every field
//! instantiated from a template starts out optional, whatever the
//! template itself declares.

use serde::{Deserialize, Serialize};
use vitae_fields::{FieldDefinition, FieldId, FieldKind};

use crate::types::{CustomSection, SectionId};

/// A field declaration inside a template. Ids are assigned at
/// instantiation time, never copied from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateField {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl TemplateField {
    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            placeholder: None,
            required: false,
        }
    }

    fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// An immutable catalog entry used to seed new custom sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub allow_multiple: bool,
    pub fields: Vec<TemplateField>,
}

/// The fixed template catalog, in declaration order. Stable across
/// calls.
pub fn list_templates() -> Vec<SectionTemplate> {
    vec![
        SectionTemplate {
            id: "work-experience".into(),
            name: "Work Experience".into(),
            description: "Roles, employers, and what you did there".into(),
            icon: "briefcase".into(),
            color: "#2563eb".into(),
            allow_multiple: true,
            fields: vec![
                TemplateField::new("Company", FieldKind::Text)
                    .with_placeholder("Acme Inc.")
                    .required(),
                TemplateField::new("Position", FieldKind::Text).with_placeholder("Staff Engineer"),
                TemplateField::new("Start Date", FieldKind::Date),
                TemplateField::new("End Date", FieldKind::Date),
                TemplateField::new("Description", FieldKind::RichText),
            ],
        },
        SectionTemplate {
            id: "education".into(),
            name: "Education".into(),
            description: "Schools, degrees, and fields of study".into(),
            icon: "graduation-cap".into(),
            color: "#7c3aed".into(),
            allow_multiple: true,
            fields: vec![
                TemplateField::new("Institution", FieldKind::Text).required(),
                TemplateField::new("Degree", FieldKind::Text),
                TemplateField::new("Field of Study", FieldKind::Text),
                TemplateField::new("Start Date", FieldKind::Date),
                TemplateField::new("End Date", FieldKind::Date),
            ],
        },
        SectionTemplate {
            id: "certifications".into(),
            name: "Certifications".into(),
            description: "Professional certifications and licenses".into(),
            icon: "certificate".into(),
            color: "#ca8a04".into(),
            allow_multiple: true,
            fields: vec![
                TemplateField::new("Name", FieldKind::Text).required(),
                TemplateField::new("Issuer", FieldKind::Text),
                TemplateField::new("Issue Date", FieldKind::Date),
                TemplateField::new("Credential URL", FieldKind::Url),
            ],
        },
        SectionTemplate {
            id: "projects".into(),
            name: "Projects".into(),
            description: "Personal or professional projects".into(),
            icon: "folder".into(),
            color: "#0891b2".into(),
            allow_multiple: true,
            fields: vec![
                TemplateField::new("Name", FieldKind::Text).required(),
                TemplateField::new("URL", FieldKind::Url),
                TemplateField::new("Description", FieldKind::RichText),
            ],
        },
        SectionTemplate {
            id: "publications".into(),
            name: "Publications".into(),
            description: "Papers, articles, and books".into(),
            icon: "book-open".into(),
            color: "#be123c".into(),
            allow_multiple: true,
            fields: vec![
                TemplateField::new("Title", FieldKind::Text).required(),
                TemplateField::new("Publisher", FieldKind::Text),
                TemplateField::new("Date", FieldKind::Date),
                TemplateField::new("URL", FieldKind::Url),
            ],
        },
        SectionTemplate {
            id: "languages".into(),
            name: "Languages".into(),
            description: "Spoken languages and proficiency".into(),
            icon: "translate".into(),
            color: "#16a34a".into(),
            allow_multiple: true,
            fields: vec![
                TemplateField::new("Language", FieldKind::Text).required(),
                TemplateField::new("Proficiency", FieldKind::Text)
                    .with_placeholder("Native, fluent, conversational…"),
            ],
        },
        SectionTemplate {
            id: "awards".into(),
            name: "Awards".into(),
            description: "Honors and recognition".into(),
            icon: "trophy".into(),
            color: "#d97706".into(),
            allow_multiple: true,
            fields: vec![
                TemplateField::new("Title", FieldKind::Text).required(),
                TemplateField::new("Awarder", FieldKind::Text),
                TemplateField::new("Date", FieldKind::Date),
                TemplateField::new("Summary", FieldKind::Textarea),
            ],
        },
        SectionTemplate {
            id: "volunteering".into(),
            name: "Volunteering".into(),
            description: "Volunteer work and community involvement".into(),
            icon: "heart".into(),
            color: "#db2777".into(),
            allow_multiple: true,
            fields: vec![
                TemplateField::new("Organization", FieldKind::Text).required(),
                TemplateField::new("Role", FieldKind::Text),
                TemplateField::new("Start Date", FieldKind::Date),
                TemplateField::new("End Date", FieldKind::Date),
                TemplateField::new("Description", FieldKind::RichText),
            ],
        },
        SectionTemplate {
            id: "references".into(),
            name: "References".into(),
            description: "People who can vouch for your work".into(),
            icon: "users".into(),
            color: "#4b5563".into(),
            allow_multiple: true,
            fields: vec![
                TemplateField::new("Name", FieldKind::Text).required(),
                TemplateField::new("Relationship", FieldKind::Text),
                TemplateField::new("Email", FieldKind::Email),
                TemplateField::new("Phone", FieldKind::Phone),
            ],
        },
    ]
}

/// Look up a template by its catalog id.
pub fn find_template(id: &str) -> Option<SectionTemplate> {
    list_templates().into_iter().find(|t| t.id == id)
}

/// Instantiate a template into a new custom section draft.
///
/// Every field gets a fresh id (a template can be instantiated many
/// times concurrently without collision), and every field starts
/// optional regardless of the template's own flags. Order is assigned
/// when the section is appended to the resume.
pub fn instantiate(template: &SectionTemplate) -> CustomSection {
    CustomSection {
        id: SectionId::new(),
        name: template.name.clone(),
        icon: Some(template.icon.clone()),
        color: Some(template.color.clone()),
        allow_multiple: template.allow_multiple,
        order: 0,
        fields: template
            .fields
            .iter()
            .map(|f| FieldDefinition {
                id: FieldId::new(),
                name: f.name.clone(),
                kind: f.kind,
                placeholder: f.placeholder.clone(),
                required: false,
            })
            .collect(),
        entries: Vec::new(),
    }
}
