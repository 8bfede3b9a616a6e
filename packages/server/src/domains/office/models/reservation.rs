use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{OfficeId, ReservationId, UserId};

/// Reservation - a visitor's booking of an office.
///
/// The listing engine reads reservations only: existence checks gate
/// deletion, and Active counts decorate list/detail responses. Booking
/// lifecycle lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reservation {
    pub id: ReservationId,
    pub office_id: OfficeId,
    pub user_id: UserId,
    pub price: i64,
    pub status: ReservationStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Reservation status enum
///
/// Stored as a smallint: 1 = active, 2 = cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i16)]
pub enum ReservationStatus {
    Active = 1,
    Cancelled = 2,
}

/// Helper struct for batch-loading Active-reservation counts per office.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActiveCountForOffice {
    pub office_id: OfficeId,
    pub count: i64,
}

// =============================================================================
// SQL Queries
// =============================================================================

impl Reservation {
    /// Whether the office has at least one Active reservation
    pub async fn exists_active_for_office(office_id: OfficeId, pool: &PgPool) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM reservations WHERE office_id = $1 AND status = $2)",
        )
        .bind(office_id)
        .bind(ReservationStatus::Active)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Batch-load Active-reservation counts for multiple offices.
    ///
    /// Offices without reservations are absent from the result; callers
    /// default those to zero.
    pub async fn count_active_for_office_ids(
        office_ids: &[OfficeId],
        pool: &PgPool,
    ) -> Result<Vec<ActiveCountForOffice>> {
        sqlx::query_as::<_, ActiveCountForOffice>(
            r#"
            SELECT office_id, COUNT(*) AS count
            FROM reservations
            WHERE office_id = ANY($1) AND status = $2
            GROUP BY office_id
            "#,
        )
        .bind(office_ids)
        .bind(ReservationStatus::Active)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Create a reservation (fixtures)
    pub async fn create(
        office_id: OfficeId,
        user_id: UserId,
        price: i64,
        status: ReservationStatus,
        start_date: NaiveDate,
        end_date: NaiveDate,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (office_id, user_id, price, status, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(office_id)
        .bind(user_id)
        .bind(price)
        .bind(status)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
