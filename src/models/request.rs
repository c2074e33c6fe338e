//! Request models for the approval workflow.
//!
//! A submitted request lives in memory as a [`PendingRequest`] until it is
//! decided. Approval writes a [`StoredRequest`] through to the durable
//! store; rejection leaves no durable trace. Wire names are `camelCase` to
//! match the JSON the clients already speak.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppError, Result};

/// Minimum title length accepted at intake.
pub const MIN_TITLE_LEN: usize = 3;
/// Minimum details length accepted at intake.
pub const MIN_DETAILS_LEN: usize = 5;

/// A submitted request awaiting an approve/reject decision.
///
/// Held only in the in-memory pending register; never persisted. The
/// `status` field is `"pending"` for the whole time the entry is resident
/// and exists for uniform serialization with stored records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PendingRequest {
    /// Register-assigned identity, unique among resident entries.
    pub id: String,
    /// Concise summary of the request.
    pub title: String,
    /// Free-form explanation of what is being requested.
    pub details: String,
    /// Classification label chosen by the submitter.
    pub category: String,
    /// Urgency label, conventionally one of low/medium/high.
    pub priority: String,
    /// Lifecycle status string.
    pub status: String,
    /// Optional display identity of the submitter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Optional numeric identity of the submitter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// Timestamp assigned at insertion.
    pub created_at: DateTime<Utc>,
}

/// A durably stored, decided request. Only approvals reach the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredRequest {
    /// Store-assigned numeric identity, a separate namespace from
    /// pending ids.
    pub id: i64,
    /// Concise summary of the request.
    pub title: String,
    /// Free-form explanation of what was requested.
    pub details: String,
    /// Classification label.
    pub category: String,
    /// Urgency label.
    pub priority: String,
    /// Final status; `"approved"` in the current flow.
    pub status: String,
    /// Optional numeric identity of the submitter.
    pub user_id: Option<i64>,
    /// Submitter display name.
    pub user_name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for the durable store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStoredRequest {
    /// Concise summary of the request.
    pub title: String,
    /// Free-form explanation of what was requested.
    pub details: String,
    /// Classification label.
    pub category: String,
    /// Urgency label.
    pub priority: String,
    /// Status to persist.
    pub status: String,
    /// Optional numeric identity of the submitter.
    pub user_id: Option<i64>,
    /// Submitter display name.
    pub user_name: Option<String>,
}

impl NewStoredRequest {
    /// Build an approval insert payload from a pending entry.
    ///
    /// Missing submitter names default to `"Anonymous"` so the stored
    /// record always carries a display identity.
    #[must_use]
    pub fn approved_from(pending: &PendingRequest) -> Self {
        Self {
            title: pending.title.clone(),
            details: pending.details.clone(),
            category: pending.category.clone(),
            priority: pending.priority.clone(),
            status: "approved".into(),
            user_id: pending.user_id,
            user_name: Some(
                pending
                    .user_name
                    .clone()
                    .unwrap_or_else(|| "Anonymous".into()),
            ),
        }
    }
}

/// Raw submission body accepted at intake, before validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Concise summary of the request.
    pub title: String,
    /// Free-form explanation of what is being requested.
    pub details: String,
    /// Classification label.
    pub category: String,
    /// Urgency label.
    pub priority: String,
    /// Optional display identity of the submitter.
    #[serde(default)]
    pub user_name: Option<String>,
    /// Optional numeric identity of the submitter.
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl Submission {
    /// Validate field constraints, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` carrying a comma-joined list of
    /// human-readable messages when any constraint is violated.
    pub fn validate(&self) -> Result<()> {
        let mut violations = Vec::new();

        if self.title.trim().chars().count() < MIN_TITLE_LEN {
            violations.push(format!("Title must be at least {MIN_TITLE_LEN} characters"));
        }
        if self.details.trim().chars().count() < MIN_DETAILS_LEN {
            violations.push(format!(
                "Details must be at least {MIN_DETAILS_LEN} characters"
            ));
        }
        if self.category.trim().is_empty() {
            violations.push("Please select a category".into());
        }
        if self.priority.trim().is_empty() {
            violations.push("Please select a priority".into());
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(violations.join(", ")))
        }
    }
}

/// Approve or reject verb for a decision call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DecisionAction {
    /// Accept the request and persist it.
    Approve,
    /// Discard the request without persisting.
    Reject,
}

/// Decision body referencing a pending entry by id.
///
/// An unknown `action` string fails deserialization, which the HTTP
/// layer reports as a 400.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    /// Pending entry identifier.
    pub id: String,
    /// Approve or reject.
    pub action: DecisionAction,
}
