//! Integration tests for the append-only audit trail.

mod common;

use common::{insert_listing, test_pool};
use rentdesk_db::models::audit::CreateAuditLog;
use rentdesk_db::repositories::AuditLogRepo;
use rentdesk_db::DbPool;

fn entry(listing_id: Option<i64>, action: &str) -> CreateAuditLog {
    CreateAuditLog {
        listing_id,
        admin_username: "admin".into(),
        action: action.into(),
        old_values: None,
        new_values: None,
    }
}

async fn insert_at(pool: &DbPool, listing_id: i64, action: &str, created_at: &str) {
    sqlx::query(
        "INSERT INTO audit_logs (listing_id, admin_username, action, created_at)
         VALUES (?, 'admin', ?, ?)",
    )
    .bind(listing_id)
    .bind(action)
    .bind(created_at)
    .execute(pool)
    .await
    .unwrap();
}

#[tokio::test]
async fn append_assigns_id_and_timestamp() {
    let pool = test_pool().await;
    let stored = AuditLogRepo::append(&pool, &entry(Some(1), "approve")).await.unwrap();

    assert_eq!(stored.id, 1);
    assert_eq!(stored.listing_id, Some(1));
    assert_eq!(stored.action, "approve");
}

#[tokio::test]
async fn unknown_action_is_rejected() {
    let pool = test_pool().await;
    assert!(AuditLogRepo::append(&pool, &entry(Some(1), "delete")).await.is_err());
}

#[tokio::test]
async fn recent_entries_are_newest_first() {
    let pool = test_pool().await;
    insert_at(&pool, 1, "approve", "2026-01-01T10:00:00.000Z").await;
    insert_at(&pool, 1, "reject", "2026-01-01T12:00:00.000Z").await;
    insert_at(&pool, 1, "edit", "2026-01-01T11:00:00.000Z").await;

    let actions: Vec<String> = AuditLogRepo::list_recent(&pool, 100)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.action)
        .collect();
    assert_eq!(actions, vec!["reject", "edit", "approve"]);
}

#[tokio::test]
async fn same_instant_entries_keep_insertion_order() {
    let pool = test_pool().await;
    insert_at(&pool, 1, "approve", "2026-01-01T10:00:00.000Z").await;
    insert_at(&pool, 2, "reject", "2026-01-01T10:00:00.000Z").await;

    let entries = AuditLogRepo::list_recent(&pool, 100).await.unwrap();
    assert_eq!(entries[0].listing_id, Some(1));
    assert_eq!(entries[1].listing_id, Some(2));
}

#[tokio::test]
async fn recent_respects_limit() {
    let pool = test_pool().await;
    for _ in 0..5 {
        AuditLogRepo::append(&pool, &entry(Some(1), "approve")).await.unwrap();
    }
    assert_eq!(AuditLogRepo::list_recent(&pool, 3).await.unwrap().len(), 3);
}

#[tokio::test]
async fn entries_resolve_listing_titles() {
    let pool = test_pool().await;
    let listing = insert_listing(&pool, "BMW X5 2022", "BMW", "X5", "Los Angeles, CA").await;
    AuditLogRepo::append(&pool, &entry(Some(listing.id), "approve")).await.unwrap();

    let entries = AuditLogRepo::list_recent(&pool, 100).await.unwrap();
    assert_eq!(entries[0].listing_title, "BMW X5 2022");
}

#[tokio::test]
async fn unresolved_listing_gets_fallback_label() {
    let pool = test_pool().await;
    AuditLogRepo::append(&pool, &entry(Some(999), "approve")).await.unwrap();
    AuditLogRepo::append(&pool, &entry(None, "create")).await.unwrap();

    let entries = AuditLogRepo::list_recent(&pool, 100).await.unwrap();
    let labels: Vec<&str> = entries.iter().map(|e| e.listing_title.as_str()).collect();
    assert!(labels.contains(&"Listing #999"));
    assert!(labels.contains(&"Unknown listing"));
}

#[tokio::test]
async fn per_listing_history_excludes_other_listings() {
    let pool = test_pool().await;
    AuditLogRepo::append(&pool, &entry(Some(1), "approve")).await.unwrap();
    AuditLogRepo::append(&pool, &entry(Some(2), "reject")).await.unwrap();
    AuditLogRepo::append(&pool, &entry(Some(1), "edit")).await.unwrap();

    let entries = AuditLogRepo::list_for_listing(&pool, 1, 100).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e.listing_id == Some(1)));
    assert_eq!(AuditLogRepo::count_for_listing(&pool, 2).await.unwrap(), 1);
}

#[tokio::test]
async fn entries_cannot_be_updated() {
    let pool = test_pool().await;
    AuditLogRepo::append(&pool, &entry(Some(1), "approve")).await.unwrap();

    let result = sqlx::query("UPDATE audit_logs SET action = 'reject'")
        .execute(&pool)
        .await;
    assert!(result.is_err());

    let entries = AuditLogRepo::list_recent(&pool, 100).await.unwrap();
    assert_eq!(entries[0].action, "approve");
}

#[tokio::test]
async fn entries_cannot_be_deleted() {
    let pool = test_pool().await;
    AuditLogRepo::append(&pool, &entry(Some(1), "approve")).await.unwrap();

    let result = sqlx::query("DELETE FROM audit_logs").execute(&pool).await;
    assert!(result.is_err());
    assert_eq!(AuditLogRepo::count(&pool).await.unwrap(), 1);
}
