//! Database fixtures for integration tests.
//!
//! The test database is shared across tests, so every fixture creates rows
//! with unique identifying data and tests scope their queries to them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use server_core::common::UserId;
use server_core::domains::office::models::ReservationStatus;
use server_core::domains::office::{ApprovalStatus, Image, Office, Reservation, User};
use server_core::domains::tag::Tag;

pub async fn create_user(pool: &PgPool, name: &str) -> User {
    let email = format!("{}-{}@example.com", name, Uuid::new_v4());
    User::create(name, &email, false, pool)
        .await
        .expect("Failed to create user")
}

pub async fn create_admin(pool: &PgPool, name: &str) -> User {
    let email = format!("{}-{}@example.com", name, Uuid::new_v4());
    User::create(name, &email, true, pool)
        .await
        .expect("Failed to create admin")
}

pub async fn create_tag(pool: &PgPool, name: &str) -> Tag {
    let unique = format!("{}-{}", name, Uuid::new_v4());
    Tag::create(&unique, pool)
        .await
        .expect("Failed to create tag")
}

/// Fixture parameters for an office row. Defaults to an approved, visible
/// listing so it shows up in unauthenticated list queries.
pub struct OfficeFixture {
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    pub hidden: bool,
    pub approved: bool,
    pub price_per_day: i64,
}

impl Default for OfficeFixture {
    fn default() -> Self {
        Self {
            title: "Test office".to_string(),
            lat: 40.74766948,
            lng: -73.98557717,
            hidden: false,
            approved: true,
            price_per_day: 10_000,
        }
    }
}

pub async fn create_office(pool: &PgPool, owner: UserId, fixture: OfficeFixture) -> Office {
    let mut tx = pool.begin().await.expect("Failed to begin transaction");
    let office = Office::insert(
        owner,
        &fixture.title,
        "A fixture office",
        Decimal::from_f64_retain(fixture.lat).expect("invalid lat"),
        Decimal::from_f64_retain(fixture.lng).expect("invalid lng"),
        "1 Fixture Street",
        None,
        fixture.hidden,
        fixture.price_per_day,
        0,
        &mut tx,
    )
    .await
    .expect("Failed to insert office");
    tx.commit().await.expect("Failed to commit");

    if fixture.approved {
        Office::set_approval_status(office.id, ApprovalStatus::Approved, pool)
            .await
            .expect("Failed to approve office")
    } else {
        office
    }
}

/// Shorthand for the common case: approved, visible, default coordinates.
pub async fn create_approved_office(pool: &PgPool, owner: UserId, title: &str) -> Office {
    create_office(
        pool,
        owner,
        OfficeFixture {
            title: title.to_string(),
            ..Default::default()
        },
    )
    .await
}

pub async fn create_image(pool: &PgPool, office: &Office, path: &str) -> Image {
    Image::create(office.id, path, pool)
        .await
        .expect("Failed to create image")
}

pub async fn create_reservation(
    pool: &PgPool,
    office: &Office,
    visitor: &User,
    status: ReservationStatus,
) -> Reservation {
    Reservation::create(
        office.id,
        visitor.id,
        office.price_per_day,
        status,
        NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date"),
        NaiveDate::from_ymd_opt(2026, 9, 5).expect("valid date"),
        pool,
    )
    .await
    .expect("Failed to create reservation")
}

pub async fn attach_tags(pool: &PgPool, office: &Office, tags: &[Tag]) {
    let tag_ids: Vec<_> = tags.iter().map(|t| t.id).collect();
    let mut tx = pool.begin().await.expect("Failed to begin transaction");
    Tag::attach(office.id, &tag_ids, &mut tx)
        .await
        .expect("Failed to attach tags");
    tx.commit().await.expect("Failed to commit");
}
