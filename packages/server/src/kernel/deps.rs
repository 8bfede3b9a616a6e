//! Server dependencies for domain operations (using traits for testability)
//!
//! This module provides the central dependency container handed to every
//! engine operation. External collaborators (notification transport, file
//! storage) sit behind trait objects so tests can substitute doubles.

use std::sync::Arc;

use sqlx::PgPool;

use super::notifier::LogNotifier;
use super::storage::LocalFileStorage;
use super::traits::{BaseAdminNotifier, BaseFileStorage};

/// Dependencies accessible to domain operations.
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub notifier: Arc<dyn BaseAdminNotifier>,
    pub storage: Arc<dyn BaseFileStorage>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        db_pool: PgPool,
        notifier: Arc<dyn BaseAdminNotifier>,
        storage: Arc<dyn BaseFileStorage>,
    ) -> Self {
        Self {
            db_pool,
            notifier,
            storage,
        }
    }

    /// Production wiring: logging notifier, local file storage.
    pub fn production(db_pool: PgPool, storage_root: &str) -> Self {
        Self::new(
            db_pool,
            Arc::new(LogNotifier),
            Arc::new(LocalFileStorage::new(storage_root)),
        )
    }
}
