use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{ImageId, OfficeId, UserId};

/// Office - a coworking space listing owned by a host
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Office {
    pub id: OfficeId,
    pub user_id: UserId,

    // Content
    pub title: String,
    pub description: String,

    // Location (8 fractional digits, kept as NUMERIC end to end)
    pub lat: Decimal,
    pub lng: Decimal,
    pub address_line1: String,
    pub address_line2: Option<String>,

    // Moderation
    pub approval_status: ApprovalStatus,
    pub hidden: bool,

    // Pricing (minor currency units)
    pub price_per_day: i64,
    pub monthly_discount: i32,

    pub featured_image_id: Option<ImageId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Approval status enum
// =============================================================================

/// Moderation state gating public visibility of a listing.
///
/// Stored as a smallint and serialized as one: 1 = pending, 2 = approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[repr(i16)]
pub enum ApprovalStatus {
    Pending = 1,
    Approved = 2,
}

impl Serialize for ApprovalStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (*self as i16).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ApprovalStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i16::deserialize(deserializer)?;
        ApprovalStatus::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "pending"),
            ApprovalStatus::Approved => write!(f, "approved"),
        }
    }
}

impl TryFrom<i16> for ApprovalStatus {
    type Error = anyhow::Error;

    fn try_from(value: i16) -> Result<Self> {
        match value {
            1 => Ok(ApprovalStatus::Pending),
            2 => Ok(ApprovalStatus::Approved),
            _ => Err(anyhow::anyhow!("Invalid approval status: {}", value)),
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Office {
    /// Find office by ID, excluding soft-deleted rows
    pub async fn find_by_id(id: OfficeId, pool: &PgPool) -> Result<Option<Self>> {
        let office = sqlx::query_as::<_, Office>(
            "SELECT * FROM offices WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(office)
    }

    /// Insert a new office (always pending, owner fixed at creation)
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        user_id: UserId,
        title: &str,
        description: &str,
        lat: Decimal,
        lng: Decimal,
        address_line1: &str,
        address_line2: Option<&str>,
        hidden: bool,
        price_per_day: i64,
        monthly_discount: i32,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Self> {
        let office = sqlx::query_as::<_, Office>(
            r#"
            INSERT INTO offices (
                user_id,
                title,
                description,
                lat,
                lng,
                address_line1,
                address_line2,
                approval_status,
                hidden,
                price_per_day,
                monthly_discount
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(lat)
        .bind(lng)
        .bind(address_line1)
        .bind(address_line2)
        .bind(ApprovalStatus::Pending)
        .bind(hidden)
        .bind(price_per_day)
        .bind(monthly_discount)
        .fetch_one(&mut **tx)
        .await?;

        Ok(office)
    }

    /// Persist the merged field values of an update, including any forced
    /// approval-status transition decided by the caller.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        id: OfficeId,
        title: &str,
        description: &str,
        lat: Decimal,
        lng: Decimal,
        address_line1: &str,
        address_line2: Option<&str>,
        approval_status: ApprovalStatus,
        hidden: bool,
        price_per_day: i64,
        monthly_discount: i32,
        featured_image_id: Option<ImageId>,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Self> {
        let office = sqlx::query_as::<_, Office>(
            r#"
            UPDATE offices
            SET
                title = $2,
                description = $3,
                lat = $4,
                lng = $5,
                address_line1 = $6,
                address_line2 = $7,
                approval_status = $8,
                hidden = $9,
                price_per_day = $10,
                monthly_discount = $11,
                featured_image_id = $12,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(lat)
        .bind(lng)
        .bind(address_line1)
        .bind(address_line2)
        .bind(approval_status)
        .bind(hidden)
        .bind(price_per_day)
        .bind(monthly_discount)
        .bind(featured_image_id)
        .fetch_one(&mut **tx)
        .await?;

        Ok(office)
    }

    /// Set the moderation status directly.
    ///
    /// Approval is an administrative action outside the listing API; this is
    /// the capability that action uses.
    pub async fn set_approval_status(
        id: OfficeId,
        status: ApprovalStatus,
        pool: &PgPool,
    ) -> Result<Self> {
        let office = sqlx::query_as::<_, Office>(
            r#"
            UPDATE offices
            SET approval_status = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(pool)
        .await?;
        Ok(office)
    }

    /// Soft-delete an office inside the caller's transaction
    pub async fn soft_delete(id: OfficeId, tx: &mut Transaction<'_, Postgres>) -> Result<()> {
        sqlx::query("UPDATE offices SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
