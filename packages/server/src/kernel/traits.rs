// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "notify admins when an office needs review") lives in
// domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAdminNotifier)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{OfficeId, UserId};

// =============================================================================
// Admin Notifier Trait (Infrastructure - notification delivery)
// =============================================================================

#[async_trait]
pub trait BaseAdminNotifier: Send + Sync {
    /// Deliver a "listing awaits approval" notification to one admin.
    ///
    /// Delivery is best-effort; callers must not treat a failure as fatal.
    async fn office_pending_approval(
        &self,
        admin_id: UserId,
        office_id: OfficeId,
        office_title: &str,
    ) -> Result<()>;
}

// =============================================================================
// File Storage Trait (Infrastructure - image files)
// =============================================================================

#[async_trait]
pub trait BaseFileStorage: Send + Sync {
    /// Delete a stored file by its path.
    ///
    /// Deleting a path that no longer exists is not an error.
    async fn delete(&self, path: &str) -> Result<()>;
}
