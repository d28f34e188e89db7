//! Durable local fallback store.
//!
//! One JSON file per collection under the data directory, named
//! `<collection>_fallback.json`, holding the serialized full collection
//! sequence. Every mutation rewrites the whole file: collections are
//! admin-sized and the store is a convenience cache for when the API is
//! unreachable, not a system of record. Mutations are serialized behind a
//! mutex so concurrent callers cannot lose updates between read and
//! persist.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Errors that can occur while persisting fallback data.
///
/// Reads never produce these: absent or unreadable data is treated as an
/// empty collection.
#[derive(Debug, Error)]
pub enum FallbackError {
    /// Filesystem failure while writing a collection.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A collection could not be serialized.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Best-effort durable cache keyed by collection name.
#[derive(Debug, Clone)]
pub struct FallbackStore {
    dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FallbackStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Read a collection in persisted order.
    ///
    /// Absence of data is not an error: a missing or unreadable file yields
    /// an empty sequence.
    pub async fn read<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        let path = self.path_for(collection);
        match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(records) => records,
                Err(err) => {
                    warn!(collection, error = %err, "discarding unreadable fallback data");
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                warn!(collection, error = %err, "failed to read fallback data");
                Vec::new()
            }
        }
    }

    /// Persist a full collection sequence, replacing what was there.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be serialized or written.
    pub async fn write<T: Serialize>(
        &self,
        collection: &str,
        records: &[T],
    ) -> Result<(), FallbackError> {
        let _guard = self.write_lock.lock().await;
        self.write_locked(collection, records).await
    }

    /// Append one record to a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be serialized or written.
    pub async fn append<T>(&self, collection: &str, record: T) -> Result<(), FallbackError>
    where
        T: Serialize + DeserializeOwned,
    {
        let _guard = self.write_lock.lock().await;
        let mut records: Vec<T> = self.read(collection).await;
        records.push(record);
        self.write_locked(collection, &records).await
    }

    /// Replace the first record matching `predicate`. Nothing is written on
    /// a miss; the return value reports whether a record was replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be serialized or written.
    pub async fn replace_where<T, P>(
        &self,
        collection: &str,
        predicate: P,
        record: T,
    ) -> Result<bool, FallbackError>
    where
        T: Serialize + DeserializeOwned,
        P: Fn(&T) -> bool,
    {
        let _guard = self.write_lock.lock().await;
        let mut records: Vec<T> = self.read(collection).await;
        let Some(index) = records.iter().position(|r| predicate(r)) else {
            return Ok(false);
        };
        if let Some(slot) = records.get_mut(index) {
            *slot = record;
        }
        self.write_locked(collection, &records).await?;
        Ok(true)
    }

    /// Remove every record matching `predicate`. Persists only when the
    /// collection shrank; the return value reports whether a removal
    /// occurred.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be serialized or written.
    pub async fn remove_where<T, P>(
        &self,
        collection: &str,
        predicate: P,
    ) -> Result<bool, FallbackError>
    where
        T: Serialize + DeserializeOwned,
        P: Fn(&T) -> bool,
    {
        let _guard = self.write_lock.lock().await;
        let mut records: Vec<T> = self.read(collection).await;
        let before = records.len();
        records.retain(|r| !predicate(r));
        if records.len() == before {
            return Ok(false);
        }
        self.write_locked(collection, &records).await?;
        Ok(true)
    }

    async fn write_locked<T: Serialize>(
        &self,
        collection: &str,
        records: &[T],
    ) -> Result<(), FallbackError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let payload = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(self.path_for(collection), payload).await?;
        debug!(collection, count = records.len(), "persisted fallback collection");
        Ok(())
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}_fallback.json"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct Record {
        id: i32,
        label: String,
    }

    fn record(id: i32, label: &str) -> Record {
        Record {
            id,
            label: label.to_string(),
        }
    }

    fn temp_store() -> FallbackStore {
        let dir = std::env::temp_dir().join(format!("storekeep-fallback-{}", uuid::Uuid::new_v4()));
        FallbackStore::new(dir)
    }

    #[tokio::test]
    async fn test_read_missing_collection_is_empty() {
        let store = temp_store();
        let records: Vec<Record> = store.read("users").await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = temp_store();
        store.append("users", record(1, "first")).await.unwrap();
        store.append("users", record(2, "second")).await.unwrap();

        let records: Vec<Record> = store.read("users").await;
        assert_eq!(records, vec![record(1, "first"), record(2, "second")]);
    }

    #[tokio::test]
    async fn test_replace_where_hits_first_match() {
        let store = temp_store();
        store
            .write("users", &[record(1, "a"), record(2, "b")])
            .await
            .unwrap();

        let replaced = store
            .replace_where("users", |r: &Record| r.id == 2, record(2, "patched"))
            .await
            .unwrap();
        assert!(replaced);

        let records: Vec<Record> = store.read("users").await;
        assert_eq!(records, vec![record(1, "a"), record(2, "patched")]);
    }

    #[tokio::test]
    async fn test_replace_where_miss_is_a_no_op() {
        let store = temp_store();
        store.write("users", &[record(1, "a")]).await.unwrap();

        let replaced = store
            .replace_where("users", |r: &Record| r.id == 9, record(9, "ghost"))
            .await
            .unwrap();
        assert!(!replaced);

        let records: Vec<Record> = store.read("users").await;
        assert_eq!(records, vec![record(1, "a")]);
    }

    #[tokio::test]
    async fn test_remove_where_reports_whether_anything_changed() {
        let store = temp_store();
        store
            .write("users", &[record(1, "a"), record(2, "b")])
            .await
            .unwrap();

        assert!(
            store
                .remove_where("users", |r: &Record| r.id == 1)
                .await
                .unwrap()
        );
        assert!(
            !store
                .remove_where("users", |r: &Record| r.id == 1)
                .await
                .unwrap()
        );

        let records: Vec<Record> = store.read("users").await;
        assert_eq!(records, vec![record(2, "b")]);
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let store = temp_store();
        store.append("users", record(1, "user")).await.unwrap();
        store.append("orders", record(1, "order")).await.unwrap();

        let users: Vec<Record> = store.read("users").await;
        let orders: Vec<Record> = store.read("orders").await;
        assert_eq!(users, vec![record(1, "user")]);
        assert_eq!(orders, vec![record(1, "order")]);
    }
}
