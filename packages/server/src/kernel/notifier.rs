//! Default admin notifier.
//!
//! The notification transport is an external collaborator; the server ships
//! with a tracing-backed implementation so environments without a configured
//! transport still record every dispatch. Swapping the transport means
//! swapping the `Arc<dyn BaseAdminNotifier>` in `ServerDeps`.

use anyhow::Result;
use async_trait::async_trait;

use super::traits::BaseAdminNotifier;
use crate::common::{OfficeId, UserId};

/// Notifier that logs each dispatch instead of delivering it.
pub struct LogNotifier;

#[async_trait]
impl BaseAdminNotifier for LogNotifier {
    async fn office_pending_approval(
        &self,
        admin_id: UserId,
        office_id: OfficeId,
        office_title: &str,
    ) -> Result<()> {
        tracing::info!(
            admin_id = %admin_id,
            office_id = %office_id,
            office_title,
            "Office pending approval notification"
        );
        Ok(())
    }
}
