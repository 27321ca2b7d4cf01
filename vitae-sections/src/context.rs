//! SectionContext - access primitives for the section engine.
//!
//! The context provides access to the working document and the
//! persistence collaborator. No business logic methods, just data
//! access primitives. Commands do all the work.
//!
//! The document is owned by a single editing session: local mutation
//! is synchronous under one lock (optimistic), persistence calls
//! happen outside it.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Result, SectionError};
use crate::persistence::Persistence;
use crate::types::{CustomSection, Resume, SectionId};

/// Context passed to every command - provides access, not logic
pub struct SectionContext {
    state: Mutex<Resume>,
    persistence: Arc<dyn Persistence>,
}

impl SectionContext {
    /// Create a context over an empty resume.
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        Self::with_resume(Resume::new(), persistence)
    }

    /// Create a context over an existing document (e.g. loaded from
    /// the persistence collaborator at session start).
    pub fn with_resume(resume: Resume, persistence: Arc<dyn Persistence>) -> Self {
        Self {
            state: Mutex::new(resume),
            persistence,
        }
    }

    /// The persistence collaborator.
    pub fn persistence(&self) -> &Arc<dyn Persistence> {
        &self.persistence
    }

    /// Read the document under the lock.
    ///
    /// The closure must not block; persistence calls belong outside.
    pub fn with_state<R>(&self, f: impl FnOnce(&Resume) -> R) -> R {
        f(&self.lock())
    }

    /// Mutate the document under the lock.
    pub fn with_state_mut<R>(&self, f: impl FnOnce(&mut Resume) -> R) -> R {
        f(&mut self.lock())
    }

    /// Clone a custom section out of the document.
    pub fn read_section(&self, id: &SectionId) -> Result<CustomSection> {
        self.with_state(|resume| {
            resume
                .section(id)
                .cloned()
                .ok_or_else(|| SectionError::section_not_found(id))
        })
    }

    /// Clone the whole document (display snapshots, tests).
    pub fn read_resume(&self) -> Resume {
        self.with_state(Clone::clone)
    }

    fn lock(&self) -> MutexGuard<'_, Resume> {
        // A poisoned lock means a panicked test thread, not corrupt
        // data; recover the guard.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
