//! Key-value storage for values that must survive a reload
//!
//! The form only ever persists the two identifiers it was seeded with, so the
//! interface is a plain string store. Backends are picked from
//! [`StorageConfig`](crate::config::StorageConfig).

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::config::{StorageBackend, StorageConfig};

pub mod filesystem;
pub mod memory;

pub use filesystem::FilesystemStorage;
pub use memory::MemoryStorage;

/// Trait for key-value storage backends
#[async_trait]
pub trait Storage: Send + Sync {
    /// Get the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Get storage backend name
    fn name(&self) -> &'static str;
}

/// Build the backend selected in configuration.
pub async fn open_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>> {
    let storage: Arc<dyn Storage> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::Filesystem => {
            let storage = FilesystemStorage::new(&config.path).await?;
            debug!(root = ?storage.root(), "filesystem storage ready");
            Arc::new(storage)
        }
    };
    debug!(backend = storage.name(), "storage opened");
    Ok(storage)
}
