//! Configuration store - Saved dice configurations in insertion order

use std::sync::Arc;

use tracing::{debug, info};

use super::{read_collection, read_for_update, write_collection};
use crate::application::ports::outbound::{ClockPort, StorageError, StoragePort};
use crate::domain::entities::DiceConfiguration;
use crate::domain::value_objects::{ConfigurationId, Die};

pub const CONFIGURATIONS_KEY: &str = "dicey_configurations";

/// Owns the persisted configuration collection
pub struct ConfigurationStore {
    storage: Arc<dyn StoragePort>,
    clock: Arc<dyn ClockPort>,
    key: String,
}

impl ConfigurationStore {
    pub fn new(storage: Arc<dyn StoragePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            storage,
            clock,
            key: CONFIGURATIONS_KEY.to_string(),
        }
    }

    /// Store under a different key (e.g. a per-profile prefix)
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// All saved configurations in the order they were created
    pub async fn list(&self) -> Vec<DiceConfiguration> {
        read_collection(self.storage.as_ref(), &self.key).await
    }

    /// Persist a new configuration with a fresh id and creation time.
    ///
    /// `dice` is stored as given; callers validate before saving.
    pub async fn create(
        &self,
        name: &str,
        dice: Vec<Die>,
    ) -> Result<DiceConfiguration, StorageError> {
        let configuration = DiceConfiguration::new(name, dice, self.clock.now());

        let mut configurations =
            read_for_update::<DiceConfiguration>(self.storage.as_ref(), &self.key).await?;
        configurations.push(configuration.clone());
        write_collection(self.storage.as_ref(), &self.key, &configurations).await?;

        info!(configuration_id = %configuration.id, "Saved configuration: {}", configuration.name);
        Ok(configuration)
    }

    /// Remove a configuration; returns whether one was removed.
    /// An unknown id leaves the collection untouched.
    pub async fn delete(&self, id: &ConfigurationId) -> Result<bool, StorageError> {
        let mut configurations =
            read_for_update::<DiceConfiguration>(self.storage.as_ref(), &self.key).await?;

        if configurations.remove_where(|configuration| &configuration.id == id) == 0 {
            debug!(configuration_id = %id, "No configuration to delete");
            return Ok(false);
        }

        write_collection(self.storage.as_ref(), &self.key, &configurations).await?;
        info!(configuration_id = %id, "Deleted configuration");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::MockStoragePort;
    use crate::infrastructure::random::FixedClock;
    use crate::infrastructure::storage::InMemoryStorage;
    use chrono::{TimeZone, Utc};

    fn store(storage: Arc<dyn StoragePort>) -> ConfigurationStore {
        let now = Utc.with_ymd_and_hms(2024, 5, 4, 18, 30, 15).unwrap();
        ConfigurationStore::new(storage, Arc::new(FixedClock(now)))
    }

    #[tokio::test]
    async fn test_create_then_list_round_trips() {
        let store = store(Arc::new(InMemoryStorage::new()));
        let dice = vec![Die::new(6, 2), Die::new(20, 1).with_modifier(-3)];

        let created = store.create("Greatsword", dice.clone()).await.unwrap();
        let listed = store.list().await;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].name, "Greatsword");
        assert_eq!(listed[0].dice, dice);
        assert_eq!(listed[0].created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = store(Arc::new(InMemoryStorage::new()));
        for name in ["first", "second", "third"] {
            store.create(name, vec![Die::new(6, 1)]).await.unwrap();
        }
        let names: Vec<String> = store.list().await.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = store(Arc::new(InMemoryStorage::new()));
        let keep = store.create("keep", vec![Die::new(4, 1)]).await.unwrap();
        let gone = store.create("gone", vec![Die::new(8, 1)]).await.unwrap();

        assert!(store.delete(&gone.id).await.unwrap());

        let listed = store.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, keep.id);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_does_not_write() {
        let stored = r#"[{"id":"a1","name":"Keep","dice":[{"sides":6,"quantity":1}],"createdAt":"2024-01-01T00:00:00Z"}]"#;
        let mut storage = MockStoragePort::new();
        storage
            .expect_get()
            .returning(move |_| Ok(Some(stored.to_string())));
        storage.expect_set().never();

        let store = store(Arc::new(storage));
        let removed = store
            .delete(&ConfigurationId::from("does-not-exist"))
            .await
            .unwrap();
        assert!(!removed);
    }

    #[tokio::test]
    async fn test_malformed_data_lists_empty_and_is_rebuilt() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.set(CONFIGURATIONS_KEY, "{not json").await.unwrap();
        let store = store(storage.clone());

        assert!(store.list().await.is_empty());

        store.create("fresh", vec![Die::new(6, 1)]).await.unwrap();
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_record_is_skipped() {
        let storage = Arc::new(InMemoryStorage::new());
        storage
            .set(
                CONFIGURATIONS_KEY,
                r#"[{"id":"bad"},{"id":"ok","name":"Ok","dice":[],"createdAt":"2024-01-01T00:00:00Z"}]"#,
            )
            .await
            .unwrap();
        let listed = store(storage).list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id.as_str(), "ok");
    }

    #[tokio::test]
    async fn test_mutations_keep_unreadable_records() {
        let storage = Arc::new(InMemoryStorage::new());
        storage
            .set(CONFIGURATIONS_KEY, r#"[{"id":"newer","name":"Newer","layout":"grid"}]"#)
            .await
            .unwrap();
        let store = store(storage.clone());

        let created = store.create("fresh", vec![Die::new(6, 1)]).await.unwrap();
        assert!(store.delete(&created.id).await.unwrap());
        assert!(!store.delete(&ConfigurationId::from("newer")).await.unwrap());

        let raw = storage.get(CONFIGURATIONS_KEY).await.unwrap().unwrap();
        let stored: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["layout"], "grid");
    }

    #[tokio::test]
    async fn test_read_failure_lists_empty() {
        let mut storage = MockStoragePort::new();
        storage
            .expect_get()
            .returning(|key| Err(StorageError::read(key, "disk unavailable")));

        assert!(store(Arc::new(storage)).list().await.is_empty());
    }

    #[tokio::test]
    async fn test_read_failure_during_create_does_not_overwrite() {
        let mut storage = MockStoragePort::new();
        storage
            .expect_get()
            .returning(|key| Err(StorageError::read(key, "disk unavailable")));
        storage.expect_set().never();

        let err = store(Arc::new(storage))
            .create("lost", vec![Die::new(6, 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
    }

    #[tokio::test]
    async fn test_write_failure_is_surfaced() {
        let mut storage = MockStoragePort::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .returning(|key, _| Err(StorageError::write(key, "quota exceeded")));

        let err = store(Arc::new(storage))
            .create("unsaved", vec![Die::new(6, 1)])
            .await
            .unwrap_err();
        assert!(err.is_write());
    }

    #[tokio::test]
    async fn test_custom_key() {
        let storage = Arc::new(InMemoryStorage::new());
        let store = store(storage.clone()).with_key("profile2_dicey_configurations");
        store.create("x", vec![Die::new(6, 1)]).await.unwrap();

        assert!(storage.get(CONFIGURATIONS_KEY).await.unwrap().is_none());
        assert!(storage
            .get("profile2_dicey_configurations")
            .await
            .unwrap()
            .is_some());
    }
}
