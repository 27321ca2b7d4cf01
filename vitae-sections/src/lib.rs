//! Ordered, schema-driven resume section engine
//!
//! This crate owns the two coupled problems at the heart of the resume
//! editor: user-defined section schemas (fields as data, not code) and a
//! dense ordering guarantee over every section-entry list. Both built-in
//! sections (fixed schema) and custom sections (dynamic schema) are
//! ordered collections whose ranks must survive reordering, insertion,
//! and deletion without duplicates or gaps.
//!
//! ## Overview
//!
//! - **One document = one editing session** - local state is mutated
//!   synchronously and optimistically, then reconciled with persistence
//! - **Commands do the work** - CRUD is expressed as command structs
//!   implementing [`Execute`]; the context provides access, not logic
//! - **One ordering mechanism** - every entry type implements
//!   [`Orderable`]; the order functions never see concrete section types
//! - **Rollback on failure** - a failed persistence call restores the
//!   exact pre-operation state, never "some valid order"
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vitae_sections::{
//!     catalog, entry::AddEntry, persistence::MemoryPersistence, section::AddSection,
//!     Execute, SectionContext,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = SectionContext::new(Arc::new(MemoryPersistence::new()));
//!
//! // Create a custom section from a catalog template
//! let template = catalog::find_template("certifications").unwrap();
//! let result = AddSection::from_template(&template).execute(&ctx).await?;
//! let section_id = result["id"].as_str().unwrap().parse()?;
//!
//! // Add an entry conforming to its schema
//! AddEntry::new(section_id).execute(&ctx).await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
mod context;
mod error;
mod op;
pub mod order;
pub mod persistence;
pub mod reorder;
pub mod summary;
pub mod types;

// Command modules
pub mod entry;
pub mod section;

pub use context::SectionContext;
pub use error::{Result, SectionError};
pub use op::{async_trait, Execute};
pub use order::{Orderable, OrderDelta};
pub use reorder::ReorderController;

// Re-export commonly used types
pub use types::{
    Certification, CustomSection, CustomSectionEntry, Education, EntryId, Project, Publication,
    Resume, SectionId, SectionKind, WorkExperience,
};
pub use vitae_fields::{FieldDefinition, FieldId, FieldKind, FieldValue, RichContent};
