//! In-memory register of submitted, undecided requests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::models::{PendingRequest, Submission};

/// Keyed collection of pending requests with register-owned identity
/// assignment.
///
/// Pending state is transient: created at process start, live for the
/// process lifetime, never persisted. Each logical operation (insert,
/// remove, snapshot) completes atomically under one mutex acquisition,
/// and no lock is ever held across an await point.
#[derive(Debug, Default)]
pub struct PendingRegister {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, PendingRequest>,
    /// Insertion order of resident ids, so snapshots are stable.
    order: Vec<String>,
    next_id: u64,
}

impl PendingRegister {
    /// Create an empty register.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a validated submission, assigning a fresh unique id and
    /// the creation timestamp. Returns a snapshot of the new entry.
    #[must_use = "the snapshot carries the assigned id"]
    pub fn insert(&self, submission: Submission) -> PendingRequest {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = format!("pending-{}", inner.next_id);

        let entry = PendingRequest {
            id: id.clone(),
            title: submission.title,
            details: submission.details,
            category: submission.category,
            priority: submission.priority,
            status: "pending".into(),
            user_name: submission.user_name,
            user_id: submission.user_id,
            created_at: Utc::now(),
        };

        inner.entries.insert(id.clone(), entry.clone());
        inner.order.push(id);
        entry
    }

    /// Look up a resident entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<PendingRequest> {
        self.lock().entries.get(id).cloned()
    }

    /// Remove an entry by id, returning it if it was resident.
    ///
    /// Idempotent: a second call for the same id returns `None`.
    #[must_use = "None signals the entry was already gone"]
    pub fn remove(&self, id: &str) -> Option<PendingRequest> {
        let mut inner = self.lock();
        let removed = inner.entries.remove(id);
        if removed.is_some() {
            inner.order.retain(|resident| resident != id);
        }
        removed
    }

    /// Snapshot all resident entries in insertion order.
    #[must_use]
    pub fn list_all(&self) -> Vec<PendingRequest> {
        let inner = self.lock();
        inner
            .order
            .iter()
            .filter_map(|id| inner.entries.get(id).cloned())
            .collect()
    }

    /// Number of resident entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the register holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }
}
