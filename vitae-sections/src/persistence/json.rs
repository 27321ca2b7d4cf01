//! File-backed persistence: one JSON file per entry, one rank file per
//! list, atomic writes via temp file + rename.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use super::Persistence;
use crate::error::{Result, SectionError};
use crate::order::OrderDelta;
use crate::types::SectionKind;

/// Stored envelope around an entry payload.
#[derive(Debug, Serialize, Deserialize)]
struct EntryRecord {
    payload: Value,
    updated_at: chrono::DateTime<Utc>,
}

/// A persistence collaborator backed by a directory of JSON files.
pub struct JsonPersistence {
    root: PathBuf,
}

impl JsonPersistence {
    /// Create a store rooted at the given directory. Directories are
    /// created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn entries_dir(&self) -> PathBuf {
        self.root.join("entries")
    }

    fn entry_path(&self, entry_id: &str) -> PathBuf {
        self.entries_dir().join(format!("{entry_id}.json"))
    }

    fn orders_dir(&self) -> PathBuf {
        self.root.join("orders")
    }

    fn orders_path(&self, section: &SectionKind) -> PathBuf {
        // Wire names for custom-entry lists contain a colon
        let name = section.wire_name().replace(':', "-");
        self.orders_dir().join(format!("{name}.json"))
    }

    /// Read an entry payload back, if present.
    pub async fn read_entry(&self, entry_id: &str) -> Result<Option<Value>> {
        let path = self.entry_path(entry_id);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).await?;
        let record: EntryRecord = serde_json::from_slice(&bytes)?;
        Ok(Some(record.payload))
    }

    /// Read the rank map of a list, if present.
    pub async fn read_orders(&self, section: &SectionKind) -> Result<HashMap<String, u32>> {
        let path = self.orders_path(section);
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let bytes = fs::read(&path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write_orders(
        &self,
        section: &SectionKind,
        orders: &HashMap<String, u32>,
    ) -> Result<()> {
        fs::create_dir_all(self.orders_dir()).await?;
        let bytes = serde_json::to_vec_pretty(orders)?;
        atomic_write(&self.orders_path(section), &bytes).await
    }
}

/// Write via a temp file in the same directory, then rename. Readers
/// never observe a partially written file.
async fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl Persistence for JsonPersistence {
    async fn create_entry(
        &self,
        section: &SectionKind,
        entry_id: &str,
        payload: Value,
    ) -> Result<()> {
        fs::create_dir_all(self.entries_dir()).await?;
        let order = payload.get("order").and_then(Value::as_u64).unwrap_or(0) as u32;
        let record = EntryRecord {
            payload,
            updated_at: Utc::now(),
        };
        atomic_write(&self.entry_path(entry_id), &serde_json::to_vec_pretty(&record)?).await?;

        let mut orders = self.read_orders(section).await?;
        orders.insert(entry_id.to_string(), order);
        self.write_orders(section, &orders).await?;

        debug!(entry = entry_id, section = %section, "entry created");
        Ok(())
    }

    async fn update_entry(&self, entry_id: &str, payload: Value) -> Result<()> {
        let path = self.entry_path(entry_id);
        if !path.exists() {
            return Err(SectionError::persistence(format!(
                "unknown entry: {entry_id}"
            )));
        }
        let record = EntryRecord {
            payload,
            updated_at: Utc::now(),
        };
        atomic_write(&path, &serde_json::to_vec_pretty(&record)?).await
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<()> {
        let path = self.entry_path(entry_id);
        if path.exists() {
            fs::remove_file(&path).await?;
        }
        debug!(entry = entry_id, "entry deleted");
        Ok(())
    }

    async fn reorder(&self, section: &SectionKind, updates: &[OrderDelta]) -> Result<()> {
        let mut orders = self.read_orders(section).await?;
        for update in updates {
            orders.insert(update.id.clone(), update.order);
        }
        self.write_orders(section, &orders).await?;
        debug!(section = %section, updates = updates.len(), "ranks persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn create_then_read_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = JsonPersistence::new(temp.path());
        let kind = SectionKind::Projects;

        store
            .create_entry(&kind, "e1", json!({"order": 2, "name": "Vitae"}))
            .await
            .unwrap();

        let payload = store.read_entry("e1").await.unwrap().unwrap();
        assert_eq!(payload["name"], "Vitae");
        assert_eq!(store.read_orders(&kind).await.unwrap()["e1"], 2);
    }

    #[tokio::test]
    async fn update_unknown_entry_fails() {
        let temp = TempDir::new().unwrap();
        let store = JsonPersistence::new(temp.path());

        let err = store.update_entry("nope", json!({})).await.unwrap_err();
        assert!(matches!(err, SectionError::Persistence { .. }));
    }

    #[tokio::test]
    async fn delete_removes_the_file() {
        let temp = TempDir::new().unwrap();
        let store = JsonPersistence::new(temp.path());
        let kind = SectionKind::Work;

        store
            .create_entry(&kind, "e1", json!({"order": 0}))
            .await
            .unwrap();
        store.delete_entry("e1").await.unwrap();

        assert!(store.read_entry("e1").await.unwrap().is_none());
        // Deleting again is a no-op
        store.delete_entry("e1").await.unwrap();
    }

    #[tokio::test]
    async fn reorder_merges_rank_updates() {
        let temp = TempDir::new().unwrap();
        let store = JsonPersistence::new(temp.path());
        let kind = SectionKind::Education;

        store
            .create_entry(&kind, "a", json!({"order": 0}))
            .await
            .unwrap();
        store
            .create_entry(&kind, "b", json!({"order": 1}))
            .await
            .unwrap();
        store
            .reorder(
                &kind,
                &[OrderDelta {
                    id: "b".into(),
                    order: 0,
                }],
            )
            .await
            .unwrap();

        let orders = store.read_orders(&kind).await.unwrap();
        assert_eq!(orders["b"], 0);
        // Untouched rank kept as written
        assert_eq!(orders["a"], 0);
    }
}
