//! Durable-store contract and the in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::models::{NewStoredRequest, StoredRequest};
use crate::Result;

/// Contract for durable storage of decided requests.
///
/// Two implementations exist: [`MemoryStore`] for development and tests,
/// and [`super::SqliteStore`] for production. Selection happens once at
/// construction time in [`super::open_store`].
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Persist a new record, assigning its numeric identity and
    /// timestamps.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the write fails.
    async fn create(&self, request: NewStoredRequest) -> Result<StoredRequest>;

    /// List all stored records ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    async fn list(&self) -> Result<Vec<StoredRequest>>;

    /// List stored records with the given status, ordered by creation
    /// time.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    async fn list_by_status(&self, status: &str) -> Result<Vec<StoredRequest>>;

    /// Update the status of a stored record, refreshing `updated_at`.
    ///
    /// Returns `Ok(None)` if no record has the given id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the update fails.
    async fn update_status(&self, id: i64, status: &str) -> Result<Option<StoredRequest>>;
}

/// In-process map-backed store for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    records: HashMap<i64, StoredRequest>,
    next_id: i64,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_creation(mut records: Vec<StoredRequest>) -> Vec<StoredRequest> {
    records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    records
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn create(&self, request: NewStoredRequest) -> Result<StoredRequest> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let now = Utc::now();
        let record = StoredRequest {
            id: inner.next_id,
            title: request.title,
            details: request.details,
            category: request.category,
            priority: request.priority,
            status: request.status,
            user_id: request.user_id,
            user_name: request.user_name,
            created_at: now,
            updated_at: now,
        };
        inner.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<StoredRequest>> {
        let inner = self.inner.lock().await;
        Ok(sorted_by_creation(inner.records.values().cloned().collect()))
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<StoredRequest>> {
        let inner = self.inner.lock().await;
        Ok(sorted_by_creation(
            inner
                .records
                .values()
                .filter(|record| record.status == status)
                .cloned()
                .collect(),
        ))
    }

    async fn update_status(&self, id: i64, status: &str) -> Result<Option<StoredRequest>> {
        let mut inner = self.inner.lock().await;
        let Some(record) = inner.records.get_mut(&id) else {
            return Ok(None);
        };
        record.status = status.to_owned();
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }
}
