//! Lock-guarded record map.
//!
//! # Responsibilities
//! - Own the identifier → record mapping
//! - Serialize writers, admit concurrent readers
//! - Hand out enumeration snapshots that keep the read lock alive

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{OwnedRwLockReadGuard, RwLock};

use crate::observability::metrics;
use crate::store::{Record, StoreError, StoreResult};

type RecordMap = HashMap<String, Arc<Record>>;

/// Concurrent in-memory record store.
///
/// Cloning is cheap and every clone observes the same map.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Arc<RwLock<RecordMap>>,
}

impl RecordStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record.
    ///
    /// Fails with [`StoreError::Validation`] if `name` or `email` is empty,
    /// in which case the map is left untouched.
    pub async fn create(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        age: u32,
    ) -> StoreResult<Arc<Record>> {
        let name = name.into();
        let email = email.into();
        if name.is_empty() || email.is_empty() {
            return Err(StoreError::Validation(
                "Name and email are required".to_string(),
            ));
        }

        let mut record = Record::new(name, email, age);

        let mut records = self.records.write().await;
        while records.contains_key(&record.id) {
            record = Record::new(record.name, record.email, record.age);
        }
        let record = Arc::new(record);
        records.insert(record.id.clone(), record.clone());
        metrics::record_store_size(records.len());

        Ok(record)
    }

    /// Look up a record by identifier.
    pub async fn get(&self, id: &str) -> StoreResult<Arc<Record>> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Take a read snapshot yielding at most `limit` records (`0` = all).
    ///
    /// Writers queue behind the snapshot until it is dropped.
    pub async fn enumerate(&self, limit: usize) -> Snapshot {
        let guard = self.records.clone().read_owned().await;
        Snapshot { guard, limit }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

/// A consistent view of the store held under the shared lock.
///
/// Iteration order is unspecified but stable for one snapshot.
pub struct Snapshot {
    guard: OwnedRwLockReadGuard<RecordMap>,
    limit: usize,
}

impl Snapshot {
    /// Lazily iterate the records visible in this snapshot.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Record>> + '_ {
        let take = if self.limit > 0 {
            self.limit
        } else {
            self.guard.len()
        };
        self.guard.values().take(take)
    }

    /// Number of records [`Snapshot::iter`] will yield.
    pub fn len(&self) -> usize {
        if self.limit > 0 {
            self.limit.min(self.guard.len())
        } else {
            self.guard.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
