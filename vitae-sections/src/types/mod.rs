//! Core types for the section engine

mod builtin;
mod entry;
mod ids;
mod resume;
mod section;

// Re-export all types
pub use builtin::{Certification, Education, Project, Publication, WorkExperience};
pub use entry::CustomSectionEntry;
pub use ids::{EntryId, SectionId};
pub use resume::{ListSnapshot, Resume, SectionKind};
pub use section::CustomSection;
