//! Built-in section entry types with fixed schemas.
//!
//! These are ordinary typed structs rather than schema-driven value
//! bags; what they share with custom entries is the `Orderable`
//! capability, so one ordering mechanism serves every section type.

use serde::{Deserialize, Serialize};
use vitae_fields::RichContent;

use super::ids::EntryId;
use crate::order::Orderable;

macro_rules! impl_orderable {
    ($name:ident) => {
        impl Orderable for $name {
            fn order_id(&self) -> String {
                self.id.to_string()
            }

            fn order(&self) -> u32 {
                self.order
            }

            fn set_order(&mut self, order: u32) {
                self.order = order;
            }
        }
    };
}

/// A work experience entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub id: EntryId,
    pub order: u32,
    pub company: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Opaque rich content produced by the editing widget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<RichContent>,
}

impl WorkExperience {
    /// Create a new entry; order is assigned when appended to a list.
    pub fn new(company: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            order: 0,
            company: company.into(),
            position: position.into(),
            start_date: None,
            end_date: None,
            url: None,
            description: None,
        }
    }
}

impl_orderable!(WorkExperience);

/// An education entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: EntryId,
    pub order: u32,
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Education {
    pub fn new(institution: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            order: 0,
            institution: institution.into(),
            degree: String::new(),
            field_of_study: String::new(),
            start_date: None,
            end_date: None,
        }
    }
}

impl_orderable!(Education);

/// A certification entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: EntryId,
    pub order: u32,
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Certification {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            order: 0,
            name: name.into(),
            issuer: String::new(),
            issue_date: None,
            url: None,
        }
    }
}

impl_orderable!(Certification);

/// A project entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntryId,
    pub order: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<RichContent>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            order: 0,
            name: name.into(),
            url: None,
            description: None,
        }
    }
}

impl_orderable!(Project);

/// A publication entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: EntryId,
    pub order: u32,
    pub title: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Publication {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            order: 0,
            title: title.into(),
            publisher: String::new(),
            date: None,
            url: None,
        }
    }
}

impl_orderable!(Publication);
