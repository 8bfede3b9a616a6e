//! Local filesystem storage for image files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::traits::BaseFileStorage;

/// File storage rooted at a directory on the local disk.
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BaseFileStorage for LocalFileStorage {
    async fn delete(&self, path: &str) -> Result<()> {
        let full_path = self.root.join(path);
        match tokio::fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            // Already gone counts as deleted
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete {}", full_path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_existing_file() {
        let dir = std::env::temp_dir().join(format!("storage-test-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("image.jpg"), b"jpeg").await.unwrap();

        let storage = LocalFileStorage::new(&dir);
        storage.delete("image.jpg").await.unwrap();

        assert!(!dir.join("image.jpg").exists());
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_ok() {
        let storage = LocalFileStorage::new(std::env::temp_dir());
        assert!(storage.delete("does-not-exist.jpg").await.is_ok());
    }
}
