//! Unit tests for server event frame serialization.

use approval_relay::models::Submission;
use approval_relay::pending::PendingRegister;
use approval_relay::realtime::ServerEvent;

fn entry() -> approval_relay::models::PendingRequest {
    let register = PendingRegister::new();
    register.insert(Submission {
        title: "Fix login bug".into(),
        details: "Login fails on Safari".into(),
        category: "technical".into(),
        priority: "high".into(),
        user_name: None,
        user_id: None,
    })
}

#[test]
fn new_request_frame_shape() {
    let event = ServerEvent::NewRequest(entry());
    let value = serde_json::to_value(&event).expect("serialize");

    assert_eq!(value["type"], "new-request");
    assert_eq!(value["data"]["title"], "Fix login bug");
    assert_eq!(value["data"]["status"], "pending");
}

#[test]
fn initial_snapshot_frame_wraps_pending_array() {
    let event = ServerEvent::initial(vec![entry(), entry()]);
    let value = serde_json::to_value(&event).expect("serialize");

    assert_eq!(value["type"], "initial-requests");
    assert_eq!(value["data"]["pending"].as_array().map(Vec::len), Some(2));
}

#[test]
fn approved_frame_carries_store_id_and_final_status() {
    let event = ServerEvent::approved(entry(), 42);
    let value = serde_json::to_value(&event).expect("serialize");

    assert_eq!(value["type"], "request-approved");
    assert_eq!(value["data"]["dbId"], 42);
    assert_eq!(value["data"]["status"], "approved");
    assert_eq!(value["data"]["title"], "Fix login bug");
}

#[test]
fn rejected_frame_has_no_store_id() {
    let event = ServerEvent::rejected(entry());
    let value = serde_json::to_value(&event).expect("serialize");

    assert_eq!(value["type"], "request-rejected");
    assert_eq!(value["data"]["status"], "rejected");
    assert!(value["data"].get("dbId").is_none());
}
