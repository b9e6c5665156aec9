//! Settings store - User toggles as a single JSON document

use std::sync::Arc;

use tracing::warn;

use crate::application::ports::outbound::{StorageError, StoragePort};
use crate::domain::value_objects::DiceSettings;

pub const SETTINGS_KEY: &str = "dicey-settings";

pub struct SettingsStore {
    storage: Arc<dyn StoragePort>,
    key: String,
}

impl SettingsStore {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self {
            storage,
            key: SETTINGS_KEY.to_string(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Stored settings, or defaults when nothing usable is stored
    pub async fn get(&self) -> DiceSettings {
        let raw = match self.storage.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return DiceSettings::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read settings, using defaults");
                return DiceSettings::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Stored settings are malformed, using defaults");
            DiceSettings::default()
        })
    }

    pub async fn save(&self, settings: &DiceSettings) -> Result<(), StorageError> {
        let json = serde_json::to_string(settings)
            .map_err(|e| StorageError::serialization(&self.key, e))?;
        self.storage.set(&self.key, &json).await
    }

    /// Drop stored settings and return the defaults
    pub async fn reset(&self) -> Result<DiceSettings, StorageError> {
        self.storage.remove(&self.key).await?;
        Ok(DiceSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    #[tokio::test]
    async fn test_defaults_when_empty_or_malformed() {
        let storage = Arc::new(InMemoryStorage::new());
        let store = SettingsStore::new(storage.clone());
        assert_eq!(store.get().await, DiceSettings::default());

        storage.set(SETTINGS_KEY, "{broken").await.unwrap();
        assert_eq!(store.get().await, DiceSettings::default());
    }

    #[tokio::test]
    async fn test_save_and_reset() {
        let store = SettingsStore::new(Arc::new(InMemoryStorage::new()));
        let settings = DiceSettings {
            modifiers_enabled: false,
            ..DiceSettings::default()
        };

        store.save(&settings).await.unwrap();
        assert_eq!(store.get().await, settings);

        assert_eq!(store.reset().await.unwrap(), DiceSettings::default());
        assert_eq!(store.get().await, DiceSettings::default());
    }
}
