//! Integration tests for office deletion.
//!
//! Covers scope and ownership enforcement, the active-reservation guard,
//! soft deletion, image row removal, and best-effort file cleanup.

mod common;

use crate::common::{
    create_approved_office, create_image, create_reservation, create_user, TestHarness,
};
use axum::http::StatusCode;
use server_core::common::Capability;
use server_core::domains::office::models::ReservationStatus;
use server_core::domains::office::Image;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_requires_authentication(ctx: &TestHarness) {
    let owner = create_user(&ctx.db_pool, "host").await;
    let office = create_approved_office(&ctx.db_pool, owner.id, "Loft").await;

    let uri = format!("/api/offices/{}", office.id);
    let (status, _) = ctx.delete(&uri, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_requires_office_delete_scope(ctx: &TestHarness) {
    let owner = create_user(&ctx.db_pool, "host").await;
    let office = create_approved_office(&ctx.db_pool, owner.id, "Loft").await;
    let token = ctx.token(&owner, vec![Capability::OfficeUpdate]);

    let uri = format!("/api/offices/{}", office.id);
    let (status, _) = ctx.delete(&uri, Some(&token)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_rejects_non_owner(ctx: &TestHarness) {
    let owner = create_user(&ctx.db_pool, "host").await;
    let stranger = create_user(&ctx.db_pool, "stranger").await;
    let office = create_approved_office(&ctx.db_pool, owner.id, "Loft").await;
    let token = ctx.token(&stranger, vec![Capability::OfficeDelete]);

    let uri = format!("/api/offices/{}", office.id);
    let (status, _) = ctx.delete(&uri, Some(&token)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_is_blocked_by_active_reservations(ctx: &TestHarness) {
    let owner = create_user(&ctx.db_pool, "host").await;
    let visitor = create_user(&ctx.db_pool, "visitor").await;
    let office = create_approved_office(&ctx.db_pool, owner.id, "Booked loft").await;
    create_reservation(&ctx.db_pool, &office, &visitor, ReservationStatus::Active).await;
    let token = ctx.token(&owner, vec![Capability::OfficeDelete]);

    let uri = format!("/api/offices/{}", office.id);
    let (status, body) = ctx.delete(&uri, Some(&token)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["office"][0]
        .as_str()
        .unwrap()
        .contains("active reservations"));

    // The office is still there
    let (status, _) = ctx.get(&uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn cancelled_reservations_do_not_block_deletion(ctx: &TestHarness) {
    let owner = create_user(&ctx.db_pool, "host").await;
    let visitor = create_user(&ctx.db_pool, "visitor").await;
    let office = create_approved_office(&ctx.db_pool, owner.id, "Once booked").await;
    create_reservation(&ctx.db_pool, &office, &visitor, ReservationStatus::Cancelled).await;
    let token = ctx.token(&owner, vec![Capability::OfficeDelete]);

    let uri = format!("/api/offices/{}", office.id);
    let (status, _) = ctx.delete(&uri, Some(&token)).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_soft_deletes_and_cleans_up_images(ctx: &TestHarness) {
    let owner = create_user(&ctx.db_pool, "host").await;
    let office = create_approved_office(&ctx.db_pool, owner.id, "Pictured loft").await;
    create_image(&ctx.db_pool, &office, "offices/a.jpg").await;
    create_image(&ctx.db_pool, &office, "offices/b.jpg").await;
    let token = ctx.token(&owner, vec![Capability::OfficeDelete]);

    let uri = format!("/api/offices/{}", office.id);
    let (status, body) = ctx.delete(&uri, Some(&token)).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    // Row is soft-deleted, not gone
    let deleted_at: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT deleted_at FROM offices WHERE id = $1")
            .bind(office.id)
            .fetch_one(&ctx.db_pool)
            .await
            .unwrap();
    assert!(deleted_at.is_some());

    // Image rows are removed and their files were handed to storage
    let images = Image::find_for_office(office.id, &ctx.db_pool).await.unwrap();
    assert!(images.is_empty());
    let mut deleted = ctx.storage.deleted_paths();
    deleted.sort();
    assert_eq!(deleted, vec!["offices/a.jpg", "offices/b.jpg"]);
}

#[tokio::test]
async fn storage_failures_do_not_fail_the_request() {
    let harness = TestHarness::with_failing_storage()
        .await
        .expect("Failed to create harness");

    let owner = create_user(&harness.db_pool, "host").await;
    let office = create_approved_office(&harness.db_pool, owner.id, "Unlucky loft").await;
    create_image(&harness.db_pool, &office, "offices/lost.jpg").await;
    let token = harness.token(&owner, vec![Capability::OfficeDelete]);

    let uri = format!("/api/offices/{}", office.id);
    let (status, _) = harness.delete(&uri, Some(&token)).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = harness.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_returns_404_for_unknown_office(ctx: &TestHarness) {
    let owner = create_user(&ctx.db_pool, "host").await;
    let token = ctx.token(&owner, vec![Capability::OfficeDelete]);

    let (status, _) = ctx.delete("/api/offices/999999999", Some(&token)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn deleting_twice_returns_404(ctx: &TestHarness) {
    let owner = create_user(&ctx.db_pool, "host").await;
    let office = create_approved_office(&ctx.db_pool, owner.id, "Loft").await;
    let token = ctx.token(&owner, vec![Capability::OfficeDelete]);

    let uri = format!("/api/offices/{}", office.id);
    let (status, _) = ctx.delete(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = ctx.delete(&uri, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
