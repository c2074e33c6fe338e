//! Unit tests for request models, validation, and wire serialization.

use approval_relay::models::{Decision, DecisionAction, NewStoredRequest, Submission};
use approval_relay::AppError;

fn sample_submission() -> Submission {
    Submission {
        title: "Fix login bug".into(),
        details: "Login fails on Safari".into(),
        category: "technical".into(),
        priority: "high".into(),
        user_name: None,
        user_id: None,
    }
}

#[test]
fn well_formed_submission_passes_validation() {
    assert!(sample_submission().validate().is_ok());
}

#[test]
fn short_title_fails_validation() {
    let submission = Submission {
        title: "ab".into(),
        ..sample_submission()
    };
    let err = submission.validate().expect_err("too short");
    let AppError::Validation(msg) = err else {
        panic!("expected validation error")
    };
    assert_eq!(msg, "Title must be at least 3 characters");
}

#[test]
fn all_violations_are_collected() {
    let submission = Submission {
        title: "ab".into(),
        details: "x".into(),
        category: String::new(),
        priority: "  ".into(),
        user_name: None,
        user_id: None,
    };
    let err = submission.validate().expect_err("invalid");
    let AppError::Validation(msg) = err else {
        panic!("expected validation error")
    };
    assert_eq!(
        msg,
        "Title must be at least 3 characters, \
         Details must be at least 5 characters, \
         Please select a category, \
         Please select a priority"
    );
}

#[test]
fn whitespace_padding_does_not_satisfy_minimums() {
    let submission = Submission {
        title: " a ".into(),
        ..sample_submission()
    };
    assert!(submission.validate().is_err());
}

#[test]
fn approved_payload_defaults_submitter_to_anonymous() {
    let register = approval_relay::pending::PendingRegister::new();
    let entry = register.insert(sample_submission());

    let payload = NewStoredRequest::approved_from(&entry);
    assert_eq!(payload.status, "approved");
    assert_eq!(payload.user_name.as_deref(), Some("Anonymous"));
    assert_eq!(payload.title, "Fix login bug");
}

#[test]
fn approved_payload_keeps_provided_submitter() {
    let register = approval_relay::pending::PendingRegister::new();
    let entry = register.insert(Submission {
        user_name: Some("Dana".into()),
        ..sample_submission()
    });

    let payload = NewStoredRequest::approved_from(&entry);
    assert_eq!(payload.user_name.as_deref(), Some("Dana"));
}

#[test]
fn pending_entry_serializes_camel_case() {
    let register = approval_relay::pending::PendingRegister::new();
    let entry = register.insert(Submission {
        user_name: Some("Dana".into()),
        ..sample_submission()
    });

    let value = serde_json::to_value(&entry).expect("serialize");
    assert_eq!(value["userName"], "Dana");
    assert_eq!(value["status"], "pending");
    assert!(value.get("createdAt").is_some());
    assert!(value.get("user_name").is_none());
}

#[test]
fn decision_parses_known_actions() {
    let decision: Decision =
        serde_json::from_str(r#"{"id":"pending-1","action":"approve"}"#).expect("parse");
    assert_eq!(decision.action, DecisionAction::Approve);

    let decision: Decision =
        serde_json::from_str(r#"{"id":"pending-1","action":"reject"}"#).expect("parse");
    assert_eq!(decision.action, DecisionAction::Reject);
}

#[test]
fn decision_rejects_unknown_action() {
    let result = serde_json::from_str::<Decision>(r#"{"id":"pending-1","action":"defer"}"#);
    assert!(result.is_err());
}

#[test]
fn submission_accepts_missing_optional_identity() {
    let submission: Submission = serde_json::from_str(
        r#"{"title":"Fix login bug","details":"Login fails on Safari","category":"technical","priority":"high"}"#,
    )
    .expect("parse");
    assert!(submission.user_name.is_none());
    assert!(submission.user_id.is_none());
}
