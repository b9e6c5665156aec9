use tokio::sync::RwLock;

use crate::application::ports::outbound::StorageError;
use crate::application::stores::SettingsStore;
use crate::domain::value_objects::DiceSettings;

pub struct SettingsService {
    store: SettingsStore,
    cache: RwLock<Option<DiceSettings>>,
}

impl SettingsService {
    pub fn new(store: SettingsStore) -> Self {
        Self {
            store,
            cache: RwLock::new(None),
        }
    }

    /// Get current settings (cached)
    pub async fn get(&self) -> DiceSettings {
        if let Some(settings) = *self.cache.read().await {
            return settings;
        }

        let settings = self.store.get().await;
        *self.cache.write().await = Some(settings);
        settings
    }

    /// Whether roll totals should include per-group modifiers
    pub async fn modifiers_enabled(&self) -> bool {
        self.get().await.modifiers_enabled
    }

    /// Persist settings and refresh the cache
    pub async fn update(&self, settings: DiceSettings) -> Result<(), StorageError> {
        self.store.save(&settings).await?;
        *self.cache.write().await = Some(settings);
        Ok(())
    }

    /// Reset to defaults and clear stored values
    pub async fn reset(&self) -> Result<DiceSettings, StorageError> {
        let settings = self.store.reset().await?;
        *self.cache.write().await = Some(settings);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::outbound::MockStoragePort;
    use crate::infrastructure::storage::InMemoryStorage;

    #[tokio::test]
    async fn test_get_reads_storage_once() {
        let mut storage = MockStoragePort::new();
        storage
            .expect_get()
            .times(1)
            .returning(|_| Ok(Some(r#"{"modifiersEnabled":false}"#.to_string())));

        let service = SettingsService::new(SettingsStore::new(Arc::new(storage)));
        assert!(!service.modifiers_enabled().await);
        assert!(!service.modifiers_enabled().await);
    }

    #[tokio::test]
    async fn test_update_and_reset() {
        let storage = Arc::new(InMemoryStorage::new());
        let service = SettingsService::new(SettingsStore::new(storage.clone()));
        let quiet = DiceSettings {
            sound_enabled: false,
            ..DiceSettings::default()
        };

        service.update(quiet).await.unwrap();
        assert_eq!(service.get().await, quiet);

        // A fresh service sees the persisted value
        let reloaded = SettingsService::new(SettingsStore::new(storage));
        assert_eq!(reloaded.get().await, quiet);

        assert_eq!(service.reset().await.unwrap(), DiceSettings::default());
        assert_eq!(reloaded.get().await, quiet, "cached until reloaded");
    }

    #[tokio::test]
    async fn test_failed_update_keeps_cache() {
        let mut storage = MockStoragePort::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .returning(|key, _| Err(StorageError::write(key, "read-only")));

        let service = SettingsService::new(SettingsStore::new(Arc::new(storage)));
        let changed = DiceSettings {
            animation_enabled: false,
            ..DiceSettings::default()
        };

        assert!(service.update(changed).await.is_err());
        assert_eq!(service.get().await, DiceSettings::default());
    }
}
