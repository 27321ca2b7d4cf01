//! In-memory persistence, used by tests and as a standalone backend.
//!
//! Records every call and supports scripted failure injection so
//! rollback paths can be exercised deterministically.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::Persistence;
use crate::error::{Result, SectionError};
use crate::order::OrderDelta;
use crate::types::SectionKind;

#[derive(Default)]
struct Inner {
    entries: HashMap<String, Value>,
    orders: HashMap<String, HashMap<String, u32>>,
    calls: Vec<String>,
    fail_next: Option<String>,
    fail_on: Option<(String, String)>,
}

/// A persistence collaborator backed by process memory.
#[derive(Default)]
pub struct MemoryPersistence {
    inner: Mutex<Inner>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call fail with the given message, simulating a
    /// transport or validation error.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.lock().fail_next = Some(message.into());
    }

    /// Make the next call whose label starts with `prefix` fail,
    /// letting earlier calls of an operation succeed. Labels are the
    /// verb plus its target, e.g. `"reorder custom:…"`.
    pub fn fail_on(&self, prefix: impl Into<String>, message: impl Into<String>) {
        self.lock().fail_on = Some((prefix.into(), message.into()));
    }

    /// The payload stored for an entry, if any.
    pub fn entry(&self, entry_id: &str) -> Option<Value> {
        self.lock().entries.get(entry_id).cloned()
    }

    /// The persisted rank of an entry within a list, if any.
    pub fn order_of(&self, section: &SectionKind, entry_id: &str) -> Option<u32> {
        self.lock()
            .orders
            .get(&section.wire_name())
            .and_then(|m| m.get(entry_id))
            .copied()
    }

    /// Every call made so far, for assertions.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_failure(inner: &mut Inner, call: &str) -> Result<()> {
        inner.calls.push(call.to_string());
        if let Some(message) = inner.fail_next.take() {
            debug!(call, "injected persistence failure");
            return Err(SectionError::persistence(message));
        }
        let armed = matches!(&inner.fail_on, Some((prefix, _)) if call.starts_with(prefix.as_str()));
        if armed {
            if let Some((prefix, message)) = inner.fail_on.take() {
                debug!(call, prefix = prefix.as_str(), "injected persistence failure");
                return Err(SectionError::persistence(message));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Persistence for MemoryPersistence {
    async fn create_entry(
        &self,
        section: &SectionKind,
        entry_id: &str,
        payload: Value,
    ) -> Result<()> {
        let mut inner = self.lock();
        Self::check_failure(&mut inner, &format!("create {entry_id}"))?;
        let order = payload.get("order").and_then(Value::as_u64).unwrap_or(0) as u32;
        inner.entries.insert(entry_id.to_string(), payload);
        inner
            .orders
            .entry(section.wire_name())
            .or_default()
            .insert(entry_id.to_string(), order);
        Ok(())
    }

    async fn update_entry(&self, entry_id: &str, payload: Value) -> Result<()> {
        let mut inner = self.lock();
        Self::check_failure(&mut inner, &format!("update {entry_id}"))?;
        if !inner.entries.contains_key(entry_id) {
            return Err(SectionError::persistence(format!(
                "unknown entry: {entry_id}"
            )));
        }
        inner.entries.insert(entry_id.to_string(), payload);
        Ok(())
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<()> {
        let mut inner = self.lock();
        Self::check_failure(&mut inner, &format!("delete {entry_id}"))?;
        inner.entries.remove(entry_id);
        for orders in inner.orders.values_mut() {
            orders.remove(entry_id);
        }
        Ok(())
    }

    async fn reorder(&self, section: &SectionKind, updates: &[OrderDelta]) -> Result<()> {
        let mut inner = self.lock();
        Self::check_failure(&mut inner, &format!("reorder {section}"))?;
        let orders = inner.orders.entry(section.wire_name()).or_default();
        for update in updates {
            orders.insert(update.id.clone(), update.order);
        }
        Ok(())
    }
}
