//! Filesystem storage backend

use crate::storage::Storage;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Filesystem storage backend
///
/// Stores each key as a JSON file (`<key>.json`) holding the value string.
/// Persistent across restarts, suitable for single-instance deployments.
#[derive(Clone)]
pub struct FilesystemStorage {
    root: PathBuf,
}

impl FilesystemStorage {
    /// Create the backend, creating `root` if needed
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .await
            .with_context(|| format!("Failed to create storage directory: {:?}", root))?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_to_path(&self, key: &str) -> PathBuf {
        // Sanitize key to make it filesystem-safe
        let safe_key = key.replace(['/', '\\', ':'], "_");
        self.root.join(format!("{}.json", safe_key))
    }
}

#[async_trait]
impl Storage for FilesystemStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_to_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read storage file: {:?}", path))?;

        let value: String =
            serde_json::from_str(&content).context("Failed to deserialize stored value")?;

        Ok(Some(value))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let path = self.key_to_path(key);
        let json = serde_json::to_string(&value).context("Failed to serialize value")?;

        fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write storage file: {:?}", path))?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}
