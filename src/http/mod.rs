//! HTTP API surface: router, shared state, and error mapping.

pub mod handlers;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::config::GlobalConfig;
use crate::intake::Intake;
use crate::mediator::DecisionMediator;
use crate::pending::PendingRegister;
use crate::persistence::RequestStore;
use crate::realtime::{ws, ClientHub};
use crate::AppError;

/// Shared application state handed to every handler.
///
/// Owns the process-wide pending register and observer hub explicitly —
/// no globals — so tests build a fresh instance each.
pub struct AppState {
    /// Runtime configuration.
    pub config: Arc<GlobalConfig>,
    /// Register of undecided requests.
    pub pending: Arc<PendingRegister>,
    /// Durable store selected at construction time.
    pub store: Arc<dyn RequestStore>,
    /// Live-observer set.
    pub hub: Arc<ClientHub>,
    /// Submission service.
    pub intake: Intake,
    /// Decision service.
    pub mediator: DecisionMediator,
}

impl AppState {
    /// Assemble the shared state around a configuration and an opened
    /// store.
    #[must_use]
    pub fn new(config: Arc<GlobalConfig>, store: Arc<dyn RequestStore>) -> Self {
        let pending = Arc::new(PendingRegister::new());
        let hub = Arc::new(ClientHub::new());
        let intake = Intake::new(Arc::clone(&pending), Arc::clone(&hub));
        let mediator =
            DecisionMediator::new(Arc::clone(&pending), Arc::clone(&store), Arc::clone(&hub));

        Self {
            config,
            pending,
            store,
            hub,
            intake,
            mediator,
        }
    }
}

/// Build the application router over the shared state.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/submit-request", post(handlers::submit_request))
        .route("/api/pending-requests", get(handlers::pending_requests))
        .route("/api/handle-decision", post(handlers::handle_decision))
        .route("/api/requests", get(handlers::list_requests))
        .route("/api/requests/{status}", get(handlers::list_requests_by_status))
        .route("/api/ws-status", get(handlers::ws_status))
        .route("/ws", get(ws::ws_handler))
        .route("/health", get(handlers::health))
        .with_state(state)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Invalid request data", "errors": errors }),
            ),
            Self::NotFound(_) => (
                StatusCode::NOT_FOUND,
                json!({ "message": "Request not found" }),
            ),
            Self::Db(_) | Self::Config(_) | Self::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": self.to_string() }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
