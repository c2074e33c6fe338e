//! Unit tests for the in-memory durable store.

use approval_relay::models::NewStoredRequest;
use approval_relay::persistence::{MemoryStore, RequestStore};

fn payload(title: &str, status: &str) -> NewStoredRequest {
    NewStoredRequest {
        title: title.into(),
        details: "some request details".into(),
        category: "general".into(),
        priority: "medium".into(),
        status: status.into(),
        user_id: None,
        user_name: Some("Anonymous".into()),
    }
}

#[tokio::test]
async fn create_assigns_ids_and_timestamps() {
    let store = MemoryStore::new();

    let first = store.create(payload("first", "approved")).await.expect("create");
    let second = store.create(payload("second", "approved")).await.expect("create");

    assert_ne!(first.id, second.id);
    assert_eq!(first.created_at, first.updated_at);
    assert_eq!(first.status, "approved");
}

#[tokio::test]
async fn list_returns_records_in_creation_order() {
    let store = MemoryStore::new();
    let first = store.create(payload("first", "approved")).await.expect("create");
    let second = store.create(payload("second", "approved")).await.expect("create");

    let listed = store.list().await.expect("list");
    let ids: Vec<i64> = listed.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn list_by_status_filters() {
    let store = MemoryStore::new();
    let approved = store.create(payload("kept", "approved")).await.expect("create");
    let _ = store.create(payload("other", "archived")).await.expect("create");

    let listed = store.list_by_status("approved").await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, approved.id);

    let empty = store.list_by_status("rejected").await.expect("list");
    assert!(empty.is_empty());
}

#[tokio::test]
async fn update_status_refreshes_record() {
    let store = MemoryStore::new();
    let record = store.create(payload("first", "approved")).await.expect("create");

    let updated = store
        .update_status(record.id, "archived")
        .await
        .expect("update")
        .expect("exists");
    assert_eq!(updated.status, "archived");
    assert!(updated.updated_at >= record.updated_at);
}

#[tokio::test]
async fn update_status_returns_none_for_missing_id() {
    let store = MemoryStore::new();
    let result = store.update_status(99, "archived").await.expect("update");
    assert!(result.is_none());
}
