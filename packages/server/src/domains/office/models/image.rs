use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{ImageId, OfficeId};

/// Image - a photo belonging to exactly one office.
///
/// The owner reference is a plain typed column rather than a
/// type-discriminator pair; offices are the only image owner.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Image {
    pub id: ImageId,
    pub office_id: OfficeId,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries
// =============================================================================

impl Image {
    /// Load one office's images
    pub async fn find_for_office(office_id: OfficeId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Image>(
            "SELECT * FROM images WHERE office_id = $1 ORDER BY id",
        )
        .bind(office_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Batch-load images for multiple offices
    pub async fn find_for_office_ids(
        office_ids: &[OfficeId],
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Image>(
            "SELECT * FROM images WHERE office_id = ANY($1) ORDER BY office_id, id",
        )
        .bind(office_ids)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Whether an image exists and belongs to the given office.
    ///
    /// Used to validate `featured_image_id` against cross-office references.
    pub async fn belongs_to_office(
        image_id: ImageId,
        office_id: OfficeId,
        pool: &PgPool,
    ) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM images WHERE id = $1 AND office_id = $2)",
        )
        .bind(image_id)
        .bind(office_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Delete all of an office's image rows inside the caller's transaction
    pub async fn delete_for_office(
        office_id: OfficeId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<()> {
        sqlx::query("DELETE FROM images WHERE office_id = $1")
            .bind(office_id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Create an image row (fixtures and upload handling)
    pub async fn create(office_id: OfficeId, path: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Image>(
            "INSERT INTO images (office_id, path) VALUES ($1, $2) RETURNING *",
        )
        .bind(office_id)
        .bind(path)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
