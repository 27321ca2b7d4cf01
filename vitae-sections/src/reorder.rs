//! Reorder controller: drag gestures over one section's entry list.
//!
//! State machine per section, per gesture:
//!
//! ```text
//! Idle -> Dragging     pointer-down on an entry (begin_drag)
//! Dragging -> Dragging pointer-move over another entry (drag_over);
//!                      preview only, ranks untouched
//! Dragging -> Committing   drop (commit_drop): ranks reassigned
//!                      optimistically, async persistence issued
//! Committing -> Idle   persistence succeeded
//! Committing -> Reverted -> Idle   persistence failed: the exact
//!                      pre-drag list is restored
//! ```
//!
//! A gesture operates on exactly one [`SectionKind`], so dragging an
//! entry across section types is unrepresentable here. While a commit
//! is in flight for a section, new gestures and drops on that section
//! are rejected rather than queued; two permutations of the same list
//! must never interleave.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::context::SectionContext;
use crate::error::{Result, SectionError};
use crate::order::OrderDelta;
use crate::types::{ListSnapshot, SectionKind};

#[derive(Debug)]
enum Phase {
    Dragging {
        dragged: String,
        sequence: Vec<String>,
    },
    Committing,
}

/// Tracks one gesture per section kind and drives optimistic commits.
#[derive(Default)]
pub struct ReorderController {
    gestures: Mutex<HashMap<String, Phase>>,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer-down on an entry: start tracking a drag. No mutation.
    ///
    /// Starting a new drag while one is already active for the same
    /// section replaces it; starting one while a commit is in flight
    /// fails with `ReorderBusy`.
    pub fn begin_drag(
        &self,
        ctx: &SectionContext,
        kind: &SectionKind,
        entry_id: &str,
    ) -> Result<()> {
        // Read the current rank sequence before taking the gesture
        // lock; lock order is always state -> gestures
        let sequence = ctx.with_state(|resume| resume.sequence(kind))?;
        if !sequence.iter().any(|id| id == entry_id) {
            return Err(SectionError::entry_not_found(entry_id));
        }

        let key = kind.wire_name();
        let mut gestures = self.lock();
        if matches!(gestures.get(&key), Some(Phase::Committing)) {
            return Err(SectionError::ReorderBusy { section: key });
        }

        debug!(section = %key, entry = entry_id, "drag started");
        gestures.insert(
            key,
            Phase::Dragging {
                dragged: entry_id.to_string(),
                sequence,
            },
        );
        Ok(())
    }

    /// Pointer-move over another entry: update the hypothetical
    /// sequence shown to the user. Ranks stay untouched.
    pub fn drag_over(&self, kind: &SectionKind, target_id: &str) -> Result<Vec<String>> {
        let key = kind.wire_name();
        let mut gestures = self.lock();
        match gestures.get_mut(&key) {
            Some(Phase::Dragging { dragged, sequence }) => {
                if dragged == target_id {
                    return Ok(sequence.clone());
                }
                let target_index = sequence
                    .iter()
                    .position(|id| id == target_id)
                    .ok_or_else(|| SectionError::entry_not_found(target_id))?;

                // Move the dragged id to the target's slot
                let dragged = dragged.clone();
                sequence.retain(|id| id != &dragged);
                let target_index = target_index.min(sequence.len());
                sequence.insert(target_index, dragged);
                Ok(sequence.clone())
            }
            Some(Phase::Committing) => Err(SectionError::ReorderBusy { section: key }),
            None => Err(SectionError::InvalidGesture {
                section: key,
                message: "no drag in progress".into(),
            }),
        }
    }

    /// The hypothetical sequence of an active drag, if any.
    pub fn preview(&self, kind: &SectionKind) -> Option<Vec<String>> {
        match self.lock().get(&kind.wire_name()) {
            Some(Phase::Dragging { sequence, .. }) => Some(sequence.clone()),
            _ => None,
        }
    }

    /// Abandon an active drag without mutating anything. A commit in
    /// flight cannot be cancelled; it resolves on its own.
    pub fn cancel(&self, kind: &SectionKind) {
        let key = kind.wire_name();
        let mut gestures = self.lock();
        if matches!(gestures.get(&key), Some(Phase::Dragging { .. })) {
            debug!(section = %key, "drag cancelled");
            gestures.remove(&key);
        }
    }

    /// Drop: commit the drag-target sequence.
    ///
    /// Local ranks are reassigned immediately (the UI never waits on
    /// the network), then the deltas are sent to the persistence
    /// collaborator. On failure the exact pre-drag list is restored
    /// and the error is surfaced for the user notification.
    pub async fn commit_drop(&self, ctx: &SectionContext, kind: &SectionKind) -> Result<Value> {
        let key = kind.wire_name();

        // Dragging -> Committing; re-entrancy guard for the section
        let sequence = {
            let mut gestures = self.lock();
            match gestures.remove(&key) {
                Some(Phase::Dragging { sequence, .. }) => {
                    gestures.insert(key.clone(), Phase::Committing);
                    sequence
                }
                Some(Phase::Committing) => {
                    gestures.insert(key.clone(), Phase::Committing);
                    return Err(SectionError::ReorderBusy { section: key });
                }
                None => {
                    return Err(SectionError::InvalidGesture {
                        section: key,
                        message: "drop without an active drag".into(),
                    })
                }
            }
        };

        // Optimistic local commit under the state lock. The list may
        // have changed since the drag began (an entry deleted or added
        // mid-gesture); a rejected permutation restores the snapshot
        // before the error surfaces, under the same lock.
        let applied: Result<(ListSnapshot, Vec<OrderDelta>)> = ctx.with_state_mut(|resume| {
            let snapshot = resume.snapshot(kind)?;
            match resume.apply_permutation(kind, &sequence) {
                Ok(deltas) => Ok((snapshot, deltas)),
                Err(err) => {
                    resume.restore(snapshot);
                    Err(err)
                }
            }
        });
        let (snapshot, deltas) = match applied {
            Ok(applied) => applied,
            Err(err) => {
                self.finish(&key);
                return Err(err);
            }
        };

        if deltas.is_empty() {
            // Dropping an entry back where it was: nothing to persist
            self.finish(&key);
            return Ok(json!({ "section": key, "updates": [] }));
        }

        debug!(section = %key, updates = deltas.len(), "committing reorder");
        let result = ctx.persistence().reorder(kind, &deltas).await;
        self.finish(&key);

        if let Err(err) = result {
            // Committing -> Reverted -> Idle
            warn!(section = %key, error = %err, "reorder failed, restoring pre-drag order");
            ctx.with_state_mut(|resume| resume.restore(snapshot));
            return Err(err);
        }

        Ok(json!({ "section": key, "updates": deltas }))
    }

    /// Back to Idle for the section.
    fn finish(&self, key: &str) {
        self.lock().remove(key);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Phase>> {
        self.gestures.lock().unwrap_or_else(|e| e.into_inner())
    }
}
