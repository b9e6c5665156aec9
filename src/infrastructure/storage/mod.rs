//! Storage adapters - Implementations of the storage port
//!
//! Backends are selected at runtime from configuration and wrapped in
//! [`StorageBackend`] so callers hold one concrete type.

mod memory;
mod sqlite;

pub use memory::InMemoryStorage;
pub use sqlite::SqliteStorage;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::application::ports::outbound::{StorageError, StoragePort};
use crate::infrastructure::config::{StorageConfig, StorageKind};

/// Enum wrapper for storage backends to enable runtime selection
#[derive(Clone)]
pub enum StorageBackend {
    Memory(InMemoryStorage),
    Sqlite(SqliteStorage),
}

impl StorageBackend {
    /// Create the backend described by the configuration
    pub async fn from_config(config: &StorageConfig) -> Result<Self> {
        match config.kind {
            StorageKind::Memory => Ok(Self::Memory(InMemoryStorage::new())),
            StorageKind::Sqlite => {
                let storage = SqliteStorage::open(&config.database_path)
                    .await
                    .with_context(|| {
                        format!("Failed to open SQLite storage at {}", config.database_path)
                    })?;
                Ok(Self::Sqlite(storage))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Sqlite(_) => "sqlite",
        }
    }
}

#[async_trait]
impl StoragePort for StorageBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Self::Memory(storage) => storage.get(key).await,
            Self::Sqlite(storage) => storage.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::Memory(storage) => storage.set(key, value).await,
            Self::Sqlite(storage) => storage.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self {
            Self::Memory(storage) => storage.remove(key).await,
            Self::Sqlite(storage) => storage.remove(key).await,
        }
    }
}
