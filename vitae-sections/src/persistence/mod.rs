//! The persistence boundary.
//!
//! The engine mutates local state synchronously and optimistically,
//! then reconciles through this trait. Any failure here is a rollback
//! trigger for the caller, never silently swallowed and never fatal to
//! the session.

mod json;
mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::order::OrderDelta;
use crate::types::SectionKind;

pub use json::JsonPersistence;
pub use memory::MemoryPersistence;

/// The external persistence collaborator.
///
/// Authorization (scoping every call to the resume the current user
/// owns) happens behind this trait, not in the engine.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Store a newly created entry (or section) of the addressed list.
    async fn create_entry(&self, section: &SectionKind, entry_id: &str, payload: Value)
        -> Result<()>;

    /// Replace the stored payload of an entry.
    async fn update_entry(&self, entry_id: &str, payload: Value) -> Result<()>;

    /// Delete an entry.
    async fn delete_entry(&self, entry_id: &str) -> Result<()>;

    /// Persist a bulk rank reassignment for one list. Rank writes are
    /// idempotent upserts, so re-sending the same deltas on a retry is
    /// safe.
    async fn reorder(&self, section: &SectionKind, updates: &[OrderDelta]) -> Result<()>;
}
