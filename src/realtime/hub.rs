//! Live-observer set and event fan-out.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::PendingRequest;

use super::events::ServerEvent;

/// Opaque identity of a registered observer.
pub type ClientId = Uuid;

/// Set of currently connected observers and the fan-out across them.
///
/// Each observer is a bounded channel sender; the transport side owns
/// the receiving half and forwards frames onto the wire. Delivery is
/// best-effort at-most-once: an observer whose channel is full is
/// skipped for that event, and one whose channel is closed is pruned.
/// One logical operation completes atomically under the mutex, which is
/// never held across an await.
#[derive(Debug, Default)]
pub struct ClientHub {
    clients: Mutex<HashMap<ClientId, mpsc::Sender<ServerEvent>>>,
}

impl ClientHub {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ClientId, mpsc::Sender<ServerEvent>>> {
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add an observer to the live set and immediately deliver its
    /// initial-state snapshot.
    ///
    /// The snapshot is queued before the sender becomes eligible for
    /// broadcasts, so an observer joining mid-stream starts from a
    /// consistent baseline instead of missing or duplicating entries.
    #[must_use = "the id is needed to unregister the observer"]
    pub fn register(
        &self,
        sender: mpsc::Sender<ServerEvent>,
        snapshot: Vec<PendingRequest>,
    ) -> ClientId {
        let id = Uuid::new_v4();
        let mut clients = self.lock();
        if let Err(err) = sender.try_send(ServerEvent::initial(snapshot)) {
            warn!(client_id = %id, %err, "failed to deliver initial snapshot");
        }
        clients.insert(id, sender);
        debug!(client_id = %id, "observer registered");
        id
    }

    /// Remove an observer from the live set. Idempotent.
    pub fn unregister(&self, id: ClientId) {
        if self.lock().remove(&id).is_some() {
            debug!(client_id = %id, "observer unregistered");
        }
    }

    /// Deliver an event to every currently registered observer.
    ///
    /// An individual observer's failure never aborts delivery to the
    /// rest: a full channel is skipped for this event (no queueing, no
    /// retry), a closed channel is removed from the set.
    pub fn broadcast(&self, event: &ServerEvent) {
        let mut clients = self.lock();
        let mut closed = Vec::new();

        for (id, sender) in &*clients {
            match sender.try_send(event.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(client_id = %id, "observer channel full, event skipped");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    closed.push(*id);
                }
            }
        }

        for id in closed {
            clients.remove(&id);
            debug!(client_id = %id, "pruned disconnected observer");
        }
    }

    /// Number of currently registered observers.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.lock().len()
    }
}
