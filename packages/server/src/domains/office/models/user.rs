use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::UserId;

/// User - referenced as office owner and notification audience only.
/// Registration and credentials live outside this service.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

// =============================================================================
// SQL Queries
// =============================================================================

impl User {
    /// Find user by ID
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, is_admin FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Batch-load users (owner summaries for a page of offices)
    pub async fn find_by_ids(ids: &[UserId], pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, is_admin FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// All admin users (the approval-notification audience)
    pub async fn find_admins(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, is_admin FROM users WHERE is_admin = true ORDER BY id",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Create a user (fixtures and seeding)
    pub async fn create(name: &str, email: &str, is_admin: bool, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, is_admin)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, is_admin
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(is_admin)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
