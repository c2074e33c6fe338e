//! Request handlers for the JSON API.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::mediator::DecisionOutcome;
use crate::models::{Decision, PendingRequest, StoredRequest, Submission};
use crate::{AppError, Result};

use super::AppState;

/// Map a body that never deserialized (malformed JSON, missing fields,
/// unknown action strings) to the 400 shape the clients expect.
fn invalid_payload(message: &str, rejection: &JsonRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": message, "errors": rejection.body_text() })),
    )
        .into_response()
}

/// Handler for `POST /api/submit-request` — validate and park a new
/// request in the pending register.
///
/// # Errors
///
/// Returns `AppError::Validation` (400) listing the violated
/// constraints. A body that fails to deserialize is answered 400
/// directly.
pub async fn submit_request(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Submission>, JsonRejection>,
) -> Result<Response> {
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(rejection) => return Ok(invalid_payload("Invalid request data", &rejection)),
    };

    let entry = state.intake.submit(submission)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": entry.id,
            "message": "Request submitted for approval",
        })),
    )
        .into_response())
}

/// Handler for `GET /api/pending-requests` — non-live snapshot of the
/// register.
#[allow(clippy::unused_async)] // axum routes require async handlers
pub async fn pending_requests(State(state): State<Arc<AppState>>) -> Json<Vec<PendingRequest>> {
    Json(state.pending.list_all())
}

/// Handler for `POST /api/handle-decision` — approve or reject a
/// pending request.
///
/// # Errors
///
/// Returns `AppError::NotFound` (404) for an unknown or already decided
/// id, and `AppError::Db` (500) when the approval write fails — in that
/// case the entry stays pending and the same decision can be re-posted.
/// A body with an unknown action string is answered 400 directly.
pub async fn handle_decision(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Decision>, JsonRejection>,
) -> Result<Response> {
    let decision = match payload {
        Ok(Json(decision)) => decision,
        Err(rejection) => return Ok(invalid_payload("Invalid decision data", &rejection)),
    };

    let outcome = state
        .mediator
        .decide(&decision.id, decision.action)
        .await
        .map_err(|err| {
            if matches!(err, AppError::Db(_)) {
                error!(id = %decision.id, %err, "decision store write failed");
            }
            err
        })?;

    let body = match outcome {
        DecisionOutcome::Approved(stored) => json!({
            "message": "Request approved and stored",
            "request": stored,
        }),
        DecisionOutcome::Rejected(snapshot) => json!({
            "message": "Request rejected",
            "request": snapshot,
        }),
    };
    Ok(Json(body).into_response())
}

/// Handler for `GET /api/requests` — all durably stored records.
///
/// # Errors
///
/// Returns `AppError::Db` (500) if the store query fails.
pub async fn list_requests(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoredRequest>>> {
    Ok(Json(state.store.list().await?))
}

/// Handler for `GET /api/requests/{status}` — stored records filtered
/// by status.
///
/// # Errors
///
/// Returns `AppError::Db` (500) if the store query fails.
pub async fn list_requests_by_status(
    State(state): State<Arc<AppState>>,
    Path(status): Path<String>,
) -> Result<Json<Vec<StoredRequest>>> {
    Ok(Json(state.store.list_by_status(&status).await?))
}

/// Handler for `GET /api/ws-status` — live-channel probe.
#[allow(clippy::unused_async)] // axum routes require async handlers
pub async fn ws_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "connected": state.hub.connection_count(),
        "ready": true,
    }))
}

/// Handler for `GET /health` — returns 200 OK with a plain-text body.
#[allow(clippy::unused_async)] // axum routes require async handlers
pub async fn health() -> &'static str {
    "ok"
}
