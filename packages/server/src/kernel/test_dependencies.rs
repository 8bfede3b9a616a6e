//! Test doubles for kernel traits.
//!
//! Integration tests wire these into `ServerDeps` to observe notifier and
//! storage calls without external side effects.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use super::traits::{BaseAdminNotifier, BaseFileStorage};
use crate::common::{OfficeId, UserId};

/// Notifier that records every dispatch for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(UserId, OfficeId)>>,
}

#[async_trait]
impl BaseAdminNotifier for RecordingNotifier {
    async fn office_pending_approval(
        &self,
        admin_id: UserId,
        office_id: OfficeId,
        _office_title: &str,
    ) -> Result<()> {
        self.sent
            .lock()
            .map_err(|_| anyhow::anyhow!("notifier mutex poisoned"))?
            .push((admin_id, office_id));
        Ok(())
    }
}

/// Storage double that records deleted paths, optionally failing.
#[derive(Default)]
pub struct RecordingStorage {
    pub deleted: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl BaseFileStorage for RecordingStorage {
    async fn delete(&self, path: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("storage backend unavailable");
        }
        self.deleted
            .lock()
            .map_err(|_| anyhow::anyhow!("storage mutex poisoned"))?
            .push(path.to_string());
        Ok(())
    }
}

impl RecordingStorage {
    pub fn failing() -> Self {
        Self {
            deleted: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn deleted_paths(&self) -> Vec<String> {
        self.deleted.lock().map(|d| d.clone()).unwrap_or_default()
    }
}
