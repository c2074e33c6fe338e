//! Request intake: validation, register insertion, created-broadcast.

use std::sync::Arc;

use tracing::info;

use crate::models::{PendingRequest, Submission};
use crate::pending::PendingRegister;
use crate::realtime::{ClientHub, ServerEvent};
use crate::Result;

/// Validates inbound submissions and turns them into pending entries.
#[derive(Clone)]
pub struct Intake {
    pending: Arc<PendingRegister>,
    hub: Arc<ClientHub>,
}

impl Intake {
    /// Wire the intake to the shared register and hub.
    #[must_use]
    pub fn new(pending: Arc<PendingRegister>, hub: Arc<ClientHub>) -> Self {
        Self { pending, hub }
    }

    /// Validate a submission, insert it into the pending register, and
    /// broadcast the `new-request` event.
    ///
    /// On a validation failure nothing is inserted and nothing is
    /// broadcast. The broadcast is fire-and-forget relative to the
    /// caller's response.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` listing every violated constraint.
    pub fn submit(&self, submission: Submission) -> Result<PendingRequest> {
        submission.validate()?;

        let entry = self.pending.insert(submission);
        info!(id = %entry.id, title = %entry.title, "request submitted");

        self.hub.broadcast(&ServerEvent::NewRequest(entry.clone()));
        Ok(entry)
    }
}
