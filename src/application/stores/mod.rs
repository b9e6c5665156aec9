//! Stores - Collections persisted through the storage port
//!
//! Every collection is one JSON document under its own key, mutated by whole-collection
//! read-modify-write. Error translation lives here so the stores share one policy:
//! - listing never fails: unreadable or malformed data yields an empty collection
//! - a mutation propagates read I/O failures (so a transient read error cannot wipe the
//!   collection) but rebuilds over malformed data
//! - a mutation writes records it cannot decode back unchanged
//! - write failures always propagate

mod configuration_store;
mod history_store;
mod settings_store;

pub use configuration_store::{ConfigurationStore, CONFIGURATIONS_KEY};
pub use history_store::{HistoryStore, DEFAULT_HISTORY_LIMIT, ROLL_HISTORY_KEY};
pub use settings_store::{SettingsStore, SETTINGS_KEY};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::application::ports::outbound::{StorageError, StoragePort};

/// Raw records of a stored collection; a missing key is an empty collection
async fn load_records(storage: &dyn StoragePort, key: &str) -> Result<Vec<Value>, StorageError> {
    let Some(raw) = storage.get(key).await? else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&raw).map_err(|e| StorageError::serialization(key, e))
}

/// One stored record: decoded, or kept verbatim because it could not be decoded
enum StoredRecord<T> {
    Decoded(T),
    Opaque(Value),
}

/// A collection read for rewriting.
///
/// Records this version cannot decode (for example ones written by a newer client)
/// keep their position and are written back unchanged.
pub(crate) struct StoredCollection<T> {
    records: Vec<StoredRecord<T>>,
}

impl<T: DeserializeOwned + Serialize> StoredCollection<T> {
    fn decode(key: &str, values: Vec<Value>) -> Self {
        let records = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match serde_json::from_value(value.clone()) {
                Ok(item) => StoredRecord::Decoded(item),
                Err(e) => {
                    warn!(key, index, error = %e, "Keeping unreadable stored record as is");
                    StoredRecord::Opaque(value)
                }
            })
            .collect();
        Self { records }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn push(&mut self, item: T) {
        self.records.push(StoredRecord::Decoded(item));
    }

    pub(crate) fn push_front(&mut self, item: T) {
        self.records.insert(0, StoredRecord::Decoded(item));
    }

    /// Keep only the first `len` records
    pub(crate) fn truncate(&mut self, len: usize) {
        self.records.truncate(len);
    }

    /// Drop decoded records matching `remove`; returns how many were dropped.
    /// Opaque records are never matched.
    pub(crate) fn remove_where<F>(&mut self, mut remove: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.records.len();
        self.records.retain(|record| match record {
            StoredRecord::Decoded(item) => !remove(item),
            StoredRecord::Opaque(_) => true,
        });
        before - self.records.len()
    }

    fn to_values(&self, key: &str) -> Result<Vec<Value>, StorageError> {
        self.records
            .iter()
            .map(|record| match record {
                StoredRecord::Decoded(item) => {
                    serde_json::to_value(item).map_err(|e| StorageError::serialization(key, e))
                }
                StoredRecord::Opaque(value) => Ok(value.clone()),
            })
            .collect()
    }
}

/// Read a collection for display, skipping records that fail to decode.
/// Failures are logged and yield an empty collection.
pub(crate) async fn read_collection<T: DeserializeOwned>(
    storage: &dyn StoragePort,
    key: &str,
) -> Vec<T> {
    let records = match load_records(storage, key).await {
        Ok(records) => records,
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored collection, using empty");
            return Vec::new();
        }
    };

    let total = records.len();
    let items: Vec<T> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(key, index, error = %e, "Skipping unreadable stored record");
                None
            }
        })
        .collect();

    if items.len() < total {
        warn!(key, kept = items.len(), total, "Some stored records could not be read");
    }
    items
}

/// Read a collection that is about to be rewritten
pub(crate) async fn read_for_update<T: DeserializeOwned + Serialize>(
    storage: &dyn StoragePort,
    key: &str,
) -> Result<StoredCollection<T>, StorageError> {
    let records = match load_records(storage, key).await {
        Ok(records) => records,
        Err(e @ StorageError::Serialization { .. }) => {
            warn!(key, error = %e, "Stored collection is malformed, rebuilding it");
            Vec::new()
        }
        Err(e) => return Err(e),
    };
    Ok(StoredCollection::decode(key, records))
}

/// Replace a stored collection
pub(crate) async fn write_collection<T: DeserializeOwned + Serialize>(
    storage: &dyn StoragePort,
    key: &str,
    collection: &StoredCollection<T>,
) -> Result<(), StorageError> {
    let values = collection.to_values(key)?;
    let json = serde_json::to_string(&values).map_err(|e| StorageError::serialization(key, e))?;
    storage.set(key, &json).await
}
