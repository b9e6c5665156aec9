//! History store - Roll log, most recent first, bounded in size

use std::sync::Arc;

use tracing::{debug, info};

use super::{read_collection, read_for_update, write_collection};
use crate::application::ports::outbound::{StorageError, StoragePort};
use crate::domain::entities::RollResult;

pub const ROLL_HISTORY_KEY: &str = "dicey_roll_history";

/// Maximum number of rolls kept; older rolls are dropped on overflow
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Owns the persisted roll history
pub struct HistoryStore {
    storage: Arc<dyn StoragePort>,
    key: String,
    limit: usize,
}

impl HistoryStore {
    pub fn new(storage: Arc<dyn StoragePort>) -> Self {
        Self {
            storage,
            key: ROLL_HISTORY_KEY.to_string(),
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Change the retention bound; a limit of zero is treated as one
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Insert a roll at the front, dropping the oldest rolls beyond the limit
    pub async fn append(&self, result: &RollResult) -> Result<(), StorageError> {
        let mut history = read_for_update::<RollResult>(self.storage.as_ref(), &self.key).await?;
        history.push_front(result.clone());

        if history.len() > self.limit {
            debug!(
                dropped = history.len() - self.limit,
                "Roll history over limit, dropping oldest"
            );
            history.truncate(self.limit);
        }

        write_collection(self.storage.as_ref(), &self.key, &history).await
    }

    /// Rolls, most recent first
    pub async fn list(&self) -> Vec<RollResult> {
        read_collection(self.storage.as_ref(), &self.key).await
    }

    /// Remove the whole history
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(&self.key).await?;
        info!("Cleared roll history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::MockStoragePort;
    use crate::domain::value_objects::{ConfigurationId, Die, RollId};
    use crate::infrastructure::storage::InMemoryStorage;
    use chrono::Utc;

    fn roll(n: u32) -> RollResult {
        RollResult {
            id: RollId::from(format!("roll-{}", n)),
            configuration_id: ConfigurationId::quick_roll(),
            configuration_name: "Quick Roll".to_string(),
            dice: vec![Die::new(20, 1)],
            results: vec![vec![n % 20 + 1]],
            modifiers: vec![0],
            total: i64::from(n % 20 + 1),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_append_is_most_recent_first() {
        let store = HistoryStore::new(Arc::new(InMemoryStorage::new()));
        store.append(&roll(1)).await.unwrap();
        store.append(&roll(2)).await.unwrap();

        let ids: Vec<String> = store
            .list()
            .await
            .into_iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(ids, vec!["roll-2", "roll-1"]);
    }

    #[tokio::test]
    async fn test_history_is_capped_at_default_limit() {
        let storage = Arc::new(InMemoryStorage::new());
        let seeded: Vec<RollResult> = (0..DEFAULT_HISTORY_LIMIT as u32).rev().map(roll).collect();
        storage
            .set(ROLL_HISTORY_KEY, &serde_json::to_string(&seeded).unwrap())
            .await
            .unwrap();
        let store = HistoryStore::new(storage);
        assert_eq!(store.list().await.len(), DEFAULT_HISTORY_LIMIT);

        store.append(&roll(1000)).await.unwrap();

        let history = store.list().await;
        assert_eq!(history.len(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(history[0].id.as_str(), "roll-1000");
        assert_eq!(history[DEFAULT_HISTORY_LIMIT - 1].id.as_str(), "roll-1");
        assert!(history.iter().all(|r| r.id.as_str() != "roll-0"));
    }

    #[tokio::test]
    async fn test_custom_limit() {
        let store = HistoryStore::new(Arc::new(InMemoryStorage::new())).with_limit(3);
        for n in 0..5 {
            store.append(&roll(n)).await.unwrap();
        }
        let ids: Vec<String> = store
            .list()
            .await
            .into_iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(ids, vec!["roll-4", "roll-3", "roll-2"]);
        assert_eq!(HistoryStore::new(Arc::new(InMemoryStorage::new())).with_limit(0).limit(), 1);
    }

    #[tokio::test]
    async fn test_clear() {
        let storage = Arc::new(InMemoryStorage::new());
        let store = HistoryStore::new(storage.clone());
        store.append(&roll(1)).await.unwrap();

        store.clear().await.unwrap();

        assert!(store.list().await.is_empty());
        assert!(storage.get(ROLL_HISTORY_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_failure_is_surfaced() {
        let mut storage = MockStoragePort::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .returning(|key, _| Err(StorageError::write(key, "quota exceeded")));

        let err = HistoryStore::new(Arc::new(storage))
            .append(&roll(1))
            .await
            .unwrap_err();
        assert!(err.is_write());
    }

    #[tokio::test]
    async fn test_append_keeps_unreadable_records() {
        let storage = Arc::new(InMemoryStorage::new());
        storage
            .set(ROLL_HISTORY_KEY, r#"[{"id":"future","extra":1}]"#)
            .await
            .unwrap();
        let store = HistoryStore::new(storage.clone());

        store.append(&roll(1)).await.unwrap();

        let raw = storage.get(ROLL_HISTORY_KEY).await.unwrap().unwrap();
        let stored: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0]["id"], "roll-1");
        assert_eq!(stored[1], serde_json::json!({"id": "future", "extra": 1}));

        let ids: Vec<String> = store.list().await.into_iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["roll-1"]);
    }

    #[tokio::test]
    async fn test_malformed_history_lists_empty() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.set(ROLL_HISTORY_KEY, "null").await.unwrap();
        assert!(HistoryStore::new(storage).list().await.is_empty());
    }
}
