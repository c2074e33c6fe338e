//! Typed events pushed to connected observers.
//!
//! Frames serialize as `{"type": <event-type>, "data": <payload>}`, the
//! protocol the `WebSocket` clients already speak.

use serde::Serialize;

use crate::models::PendingRequest;

/// Decision payload: the pending snapshot with its final status and, for
/// approvals, the store-assigned id.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionNotice {
    /// The decided request with `status` set to its final value.
    #[serde(flatten)]
    pub request: PendingRequest,
    /// Durable-store id, present only for approvals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_id: Option<i64>,
}

/// Server-to-client event frame.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Per-observer baseline snapshot sent on registration; never
    /// broadcast.
    InitialRequests {
        /// All currently pending requests.
        pending: Vec<PendingRequest>,
    },
    /// A new request entered the pending register.
    NewRequest(PendingRequest),
    /// A pending request was approved and durably stored.
    RequestApproved(DecisionNotice),
    /// A pending request was rejected and discarded.
    RequestRejected(DecisionNotice),
}

impl ServerEvent {
    /// Build the initial-state snapshot event for a newly registered
    /// observer.
    #[must_use]
    pub fn initial(pending: Vec<PendingRequest>) -> Self {
        Self::InitialRequests { pending }
    }

    /// Build an approval event carrying the store-assigned id.
    #[must_use]
    pub fn approved(mut request: PendingRequest, db_id: i64) -> Self {
        request.status = "approved".into();
        Self::RequestApproved(DecisionNotice {
            request,
            db_id: Some(db_id),
        })
    }

    /// Build a rejection event.
    #[must_use]
    pub fn rejected(mut request: PendingRequest) -> Self {
        request.status = "rejected".into();
        Self::RequestRejected(DecisionNotice {
            request,
            db_id: None,
        })
    }
}
