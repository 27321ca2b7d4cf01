//! The resume document and the addressing of its ordered lists.

use serde::{Deserialize, Serialize};

use super::builtin::{Certification, Education, Project, Publication, WorkExperience};
use super::ids::SectionId;
use super::section::CustomSection;
use crate::error::{Result, SectionError};
use crate::order::{self, OrderDelta};

/// The single-editor resume document: five built-in lists plus the
/// list of custom sections. Every list obeys the dense-order invariant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default)]
    pub work: Vec<WorkExperience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub custom: Vec<CustomSection>,
}

impl Resume {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a custom section by id.
    pub fn section(&self, id: &SectionId) -> Option<&CustomSection> {
        self.custom.iter().find(|s| &s.id == id)
    }

    /// Look up a custom section by id, mutably.
    pub fn section_mut(&mut self, id: &SectionId) -> Option<&mut CustomSection> {
        self.custom.iter_mut().find(|s| &s.id == id)
    }

    /// Ids of the addressed list in current rank order.
    pub fn sequence(&self, kind: &SectionKind) -> Result<Vec<String>> {
        match kind {
            SectionKind::Work => Ok(order::sequence(&self.work)),
            SectionKind::Education => Ok(order::sequence(&self.education)),
            SectionKind::Certifications => Ok(order::sequence(&self.certifications)),
            SectionKind::Projects => Ok(order::sequence(&self.projects)),
            SectionKind::Publications => Ok(order::sequence(&self.publications)),
            SectionKind::CustomSections => Ok(order::sequence(&self.custom)),
            SectionKind::CustomEntries(id) => {
                let section = self
                    .section(id)
                    .ok_or_else(|| SectionError::section_not_found(id))?;
                Ok(order::sequence(&section.entries))
            }
        }
    }

    /// Reassign ranks of the addressed list to match `target`, which
    /// must be a permutation of the list's current id set. Returns the
    /// deltas that need persisting.
    pub fn apply_permutation(
        &mut self,
        kind: &SectionKind,
        target: &[String],
    ) -> Result<Vec<OrderDelta>> {
        let label = kind.wire_name();
        match kind {
            SectionKind::Work => order::apply_permutation(&mut self.work, target, &label),
            SectionKind::Education => order::apply_permutation(&mut self.education, target, &label),
            SectionKind::Certifications => {
                order::apply_permutation(&mut self.certifications, target, &label)
            }
            SectionKind::Projects => order::apply_permutation(&mut self.projects, target, &label),
            SectionKind::Publications => {
                order::apply_permutation(&mut self.publications, target, &label)
            }
            SectionKind::CustomSections => order::apply_permutation(&mut self.custom, target, &label),
            SectionKind::CustomEntries(id) => {
                let section = self
                    .section_mut(id)
                    .ok_or_else(|| SectionError::section_not_found(id))?;
                order::apply_permutation(&mut section.entries, target, &label)
            }
        }
    }

    /// Clone the addressed list for rollback.
    pub fn snapshot(&self, kind: &SectionKind) -> Result<ListSnapshot> {
        match kind {
            SectionKind::Work => Ok(ListSnapshot::Work(self.work.clone())),
            SectionKind::Education => Ok(ListSnapshot::Education(self.education.clone())),
            SectionKind::Certifications => {
                Ok(ListSnapshot::Certifications(self.certifications.clone()))
            }
            SectionKind::Projects => Ok(ListSnapshot::Projects(self.projects.clone())),
            SectionKind::Publications => Ok(ListSnapshot::Publications(self.publications.clone())),
            SectionKind::CustomSections => Ok(ListSnapshot::CustomSections(self.custom.clone())),
            SectionKind::CustomEntries(id) => {
                let section = self
                    .section(id)
                    .ok_or_else(|| SectionError::section_not_found(id))?;
                Ok(ListSnapshot::CustomEntries(*id, section.entries.clone()))
            }
        }
    }

    /// Restore a previously taken snapshot, byte-for-byte.
    ///
    /// Restoring entries of a section that was deleted in the meantime
    /// is a no-op; the delete won that race locally.
    pub fn restore(&mut self, snapshot: ListSnapshot) {
        match snapshot {
            ListSnapshot::Work(list) => self.work = list,
            ListSnapshot::Education(list) => self.education = list,
            ListSnapshot::Certifications(list) => self.certifications = list,
            ListSnapshot::Projects(list) => self.projects = list,
            ListSnapshot::Publications(list) => self.publications = list,
            ListSnapshot::CustomSections(list) => self.custom = list,
            ListSnapshot::CustomEntries(id, entries) => {
                if let Some(section) = self.section_mut(&id) {
                    section.entries = entries;
                }
            }
        }
    }

    /// Density invariant check for the addressed list.
    pub fn is_dense(&self, kind: &SectionKind) -> Result<bool> {
        match kind {
            SectionKind::Work => Ok(order::is_dense(&self.work)),
            SectionKind::Education => Ok(order::is_dense(&self.education)),
            SectionKind::Certifications => Ok(order::is_dense(&self.certifications)),
            SectionKind::Projects => Ok(order::is_dense(&self.projects)),
            SectionKind::Publications => Ok(order::is_dense(&self.publications)),
            SectionKind::CustomSections => Ok(order::is_dense(&self.custom)),
            SectionKind::CustomEntries(id) => {
                let section = self
                    .section(id)
                    .ok_or_else(|| SectionError::section_not_found(id))?;
                Ok(order::is_dense(&section.entries))
            }
        }
    }
}

/// Addresses exactly one ordered list in a resume. A reorder gesture
/// operates on one kind; moving an entry across kinds is
/// unrepresentable here and rejected upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Work,
    Education,
    Certifications,
    Projects,
    Publications,
    /// The ordered list of custom sections themselves
    CustomSections,
    /// The entries of one custom section
    CustomEntries(SectionId),
}

impl SectionKind {
    /// Stable wire name, used by the persistence collaborator and as
    /// the gesture key.
    pub fn wire_name(&self) -> String {
        match self {
            Self::Work => "work".into(),
            Self::Education => "education".into(),
            Self::Certifications => "certifications".into(),
            Self::Projects => "projects".into(),
            Self::Publications => "publications".into(),
            Self::CustomSections => "custom-sections".into(),
            Self::CustomEntries(id) => format!("custom:{id}"),
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.wire_name())
    }
}

/// A cloned list, held across a suspension point for rollback.
#[derive(Debug, Clone)]
pub enum ListSnapshot {
    Work(Vec<WorkExperience>),
    Education(Vec<Education>),
    Certifications(Vec<Certification>),
    Projects(Vec<Project>),
    Publications(Vec<Publication>),
    CustomSections(Vec<CustomSection>),
    CustomEntries(SectionId, Vec<super::entry::CustomSectionEntry>),
}
