use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{OfficeId, TagId};

/// Amenity tag - shared across offices via the office_tag join table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// Helper struct for batch-loading tags with their associated office ID.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TagWithOfficeId {
    pub office_id: OfficeId,
    #[sqlx(flatten)]
    pub tag: Tag,
}

// =============================================================================
// Tag Queries
// =============================================================================

impl Tag {
    /// Find all tags ordered by id
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Tag>("SELECT id, name FROM tags ORDER BY id")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Find the subset of the given ids that exist.
    ///
    /// Used to validate caller-supplied tag lists before association.
    pub async fn find_existing_ids(ids: &[TagId], pool: &PgPool) -> Result<Vec<TagId>> {
        sqlx::query_scalar::<_, TagId>("SELECT id FROM tags WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Batch-load tags for multiple offices, in the order they were attached.
    pub async fn find_for_office_ids(
        office_ids: &[OfficeId],
        pool: &PgPool,
    ) -> Result<Vec<TagWithOfficeId>> {
        sqlx::query_as::<_, TagWithOfficeId>(
            r#"
            SELECT ot.office_id, t.id, t.name
            FROM tags t
            INNER JOIN office_tag ot ON ot.tag_id = t.id
            WHERE ot.office_id = ANY($1)
            ORDER BY ot.office_id, ot.position
            "#,
        )
        .bind(office_ids)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Load one office's tags in attachment order.
    pub async fn find_for_office(office_id: OfficeId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name
            FROM tags t
            INNER JOIN office_tag ot ON ot.tag_id = t.id
            WHERE ot.office_id = $1
            ORDER BY ot.position
            "#,
        )
        .bind(office_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Attach tags to an office inside the caller's transaction.
    ///
    /// Position records the caller-given order so the returned representation
    /// preserves it.
    pub async fn attach(
        office_id: OfficeId,
        tag_ids: &[TagId],
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<()> {
        for (position, tag_id) in tag_ids.iter().enumerate() {
            sqlx::query("INSERT INTO office_tag (office_id, tag_id, position) VALUES ($1, $2, $3)")
                .bind(office_id)
                .bind(tag_id)
                .bind(position as i32)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    /// Replace an office's full tag set inside the caller's transaction.
    pub async fn sync(
        office_id: OfficeId,
        tag_ids: &[TagId],
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<()> {
        sqlx::query("DELETE FROM office_tag WHERE office_id = $1")
            .bind(office_id)
            .execute(&mut **tx)
            .await?;

        Tag::attach(office_id, tag_ids, tx).await
    }

    /// Create a tag (fixtures and seeding)
    pub async fn create(name: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Tag>("INSERT INTO tags (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
