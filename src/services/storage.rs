use anyhow::{Result, bail};
use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Writes `data` under `key` and returns its on-disk location.
    /// Fails if `key` already exists.
    async fn upload_file(&self, key: &str, data: Bytes) -> Result<String>;
    /// Removes `key`; `Ok(false)` when there was nothing to remove
    async fn delete_file(&self, key: &str) -> Result<bool>;
    async fn is_available(&self) -> bool;
}

/// Flat directory of uploaded files, keyed by generated filename
pub struct LocalStorageService {
    root: PathBuf,
}

impl LocalStorageService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            bail!("invalid storage key '{}'", key);
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl StorageService for LocalStorageService {
    async fn upload_file(&self, key: &str, data: Bytes) -> Result<String> {
        let path = self.resolve(key)?;
        tokio::fs::create_dir_all(&self.root).await?;

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(&data).await?;
        file.flush().await?;

        Ok(path.to_string_lossy().into_owned())
    }

    async fn delete_file(&self, key: &str) -> Result<bool> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn is_available(&self) -> bool {
        tokio::fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}
