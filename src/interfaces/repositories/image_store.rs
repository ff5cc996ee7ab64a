use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};

use crate::errors::StoreError;

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Writes `bytes` under `file_name` and returns the final path.
    ///
    /// Must not overwrite an existing image; returns
    /// [`StoreError::AlreadyExists`] instead.
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError>;
}

#[derive(Debug, Clone)]
pub struct LocalImageStore {
    pub root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalImageStore { root: root.into() }
    }

    /// Creates the image directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        let path = self.root.join(file_name);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StoreError::AlreadyExists(file_name.to_string()),
                _ => StoreError::Io(e),
            })?;

        let written = async {
            file.write_all(bytes).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            // Partial images must not stay reachable under the static route.
            if let Err(rm) = fs::remove_file(&path).await {
                tracing::warn!("Failed to remove partial image {}: {}", path.display(), rm);
            }
            return Err(StoreError::Io(e));
        }

        Ok(path)
    }
}
