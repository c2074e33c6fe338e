//! Decision mediator: drives a pending entry through approve or reject.

use std::sync::Arc;

use tracing::info;

use crate::models::{DecisionAction, NewStoredRequest, PendingRequest, StoredRequest};
use crate::pending::PendingRegister;
use crate::persistence::RequestStore;
use crate::realtime::{ClientHub, ServerEvent};
use crate::{AppError, Result};

/// Outcome of a finalized decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionOutcome {
    /// The request was approved; carries the durably stored record.
    Approved(StoredRequest),
    /// The request was rejected; carries the final pending snapshot.
    Rejected(PendingRequest),
}

/// Mediates approve/reject transitions between the pending register and
/// the durable store.
#[derive(Clone)]
pub struct DecisionMediator {
    pending: Arc<PendingRegister>,
    store: Arc<dyn RequestStore>,
    hub: Arc<ClientHub>,
}

impl DecisionMediator {
    /// Wire the mediator to the shared register, store, and hub.
    #[must_use]
    pub fn new(
        pending: Arc<PendingRegister>,
        store: Arc<dyn RequestStore>,
        hub: Arc<ClientHub>,
    ) -> Self {
        Self {
            pending,
            store,
            hub,
        }
    }

    /// Finalize a decision for the given pending id.
    ///
    /// Approval writes through to the durable store before the entry is
    /// removed or any event is broadcast, so no observer is ever told
    /// "approved" for a record that is not yet retrievable. A failed
    /// store write leaves the entry pending; re-posting the same
    /// decision retries it. Rejection skips the store entirely.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the id is not resident (never
    /// submitted, or already decided). Returns `AppError::Db` if the
    /// approval write fails.
    pub async fn decide(&self, id: &str, action: DecisionAction) -> Result<DecisionOutcome> {
        let not_found = || AppError::NotFound(format!("request {id} not found"));
        let entry = self.pending.get(id).ok_or_else(not_found)?;

        match action {
            DecisionAction::Approve => {
                // Register lock is not held across this await; other ids
                // remain decidable while the write is outstanding.
                let stored = self.store.create(NewStoredRequest::approved_from(&entry)).await?;

                // A concurrent decision may have won the removal while the
                // write was outstanding; the later caller gets not-found
                // and no second broadcast goes out.
                if self.pending.remove(id).is_none() {
                    return Err(not_found());
                }
                self.hub
                    .broadcast(&ServerEvent::approved(entry, stored.id));
                info!(id, db_id = stored.id, "request approved and stored");
                Ok(DecisionOutcome::Approved(stored))
            }
            DecisionAction::Reject => {
                if self.pending.remove(id).is_none() {
                    return Err(not_found());
                }
                self.hub.broadcast(&ServerEvent::rejected(entry.clone()));
                info!(id, "request rejected");

                let mut snapshot = entry;
                snapshot.status = "rejected".into();
                Ok(DecisionOutcome::Rejected(snapshot))
            }
        }
    }
}
