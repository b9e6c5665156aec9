//! Storage port - The on-device key/value capability
//!
//! Both collections (configurations and roll history) and the user settings live
//! under their own key as a single JSON document. The engine behind this port is
//! external: browser local storage, device key/value storage, or the SQLite and
//! in-memory adapters in `infrastructure::storage`.

use async_trait::async_trait;

/// Storage operation errors with the key involved, for actionable log lines
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading a key failed
    #[error("Storage read failed for '{key}': {message}")]
    Read { key: String, message: String },

    /// Writing or removing a key failed (quota exceeded, I/O error)
    #[error("Storage write failed for '{key}': {message}")]
    Write { key: String, message: String },

    /// A stored value could not be encoded or decoded
    #[error("Serialization error for '{key}': {message}")]
    Serialization { key: String, message: String },
}

impl StorageError {
    pub fn read(key: &str, message: impl ToString) -> Self {
        Self::Read {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    pub fn write(key: &str, message: impl ToString) -> Self {
        Self::Write {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    pub fn serialization(key: &str, message: impl ToString) -> Self {
        Self::Serialization {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    /// Whether this failure means data the caller asked to persist was not saved
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoragePort: Send + Sync {
    /// Get the raw value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
