//! Intake flow: validation gate, register insertion, created-broadcast.

use approval_relay::models::Submission;
use approval_relay::realtime::ServerEvent;
use approval_relay::AppError;

use super::test_helpers::{attach_observer, sample_submission, test_state};

#[tokio::test]
async fn submission_lands_in_pending_register() {
    let state = test_state();

    let entry = state.intake.submit(sample_submission()).expect("submit");

    let pending = state.pending.list_all();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, entry.id);
    assert_eq!(pending[0].title, "Fix login bug");
    assert_eq!(pending[0].status, "pending");
}

#[tokio::test]
async fn submission_broadcasts_new_request() {
    let state = test_state();
    let (_observer, mut rx) = attach_observer(&state);
    let _ = rx.recv().await.expect("initial snapshot");

    let entry = state.intake.submit(sample_submission()).expect("submit");

    let ServerEvent::NewRequest(broadcast) = rx.recv().await.expect("broadcast") else {
        panic!("expected new-request frame");
    };
    assert_eq!(broadcast.id, entry.id);
}

#[tokio::test]
async fn invalid_submission_inserts_and_broadcasts_nothing() {
    let state = test_state();
    let (_observer, mut rx) = attach_observer(&state);
    let _ = rx.recv().await.expect("initial snapshot");

    let result = state.intake.submit(Submission {
        title: "ab".into(),
        details: "valid details".into(),
        category: "general".into(),
        priority: "low".into(),
        user_name: None,
        user_id: None,
    });

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(state.pending.is_empty());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn submitted_request_is_not_yet_durably_stored() {
    let state = test_state();
    let _ = state.intake.submit(sample_submission()).expect("submit");

    let stored = state.store.list().await.expect("list");
    assert!(stored.is_empty());
}
