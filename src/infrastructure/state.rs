//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::outbound::{ClockPort, RandomPort, StoragePort};
use crate::application::services::{DiceRollServiceImpl, RollEngine, SettingsService};
use crate::application::stores::{
    ConfigurationStore, HistoryStore, SettingsStore, CONFIGURATIONS_KEY, ROLL_HISTORY_KEY,
    SETTINGS_KEY,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::random::{SeededRandom, SystemClock, SystemRandom};
use crate::infrastructure::storage::StorageBackend;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub storage: StorageBackend,
    // Application services
    pub dice_service: DiceRollServiceImpl,
    pub settings_service: SettingsService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let storage = StorageBackend::from_config(&config.storage).await?;
        Ok(Self::with_storage(config, storage))
    }

    /// Wire services over an already-open storage backend
    pub fn with_storage(config: AppConfig, storage: StorageBackend) -> Self {
        let port: Arc<dyn StoragePort> = Arc::new(storage.clone());
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let random: Arc<dyn RandomPort> = match config.random_seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(SystemRandom::new()),
        };

        let configurations = ConfigurationStore::new(port.clone(), clock.clone())
            .with_key(config.storage.key(CONFIGURATIONS_KEY));
        let history = HistoryStore::new(port.clone())
            .with_key(config.storage.key(ROLL_HISTORY_KEY))
            .with_limit(config.history_limit);
        let settings = SettingsStore::new(port).with_key(config.storage.key(SETTINGS_KEY));

        let dice_service =
            DiceRollServiceImpl::new(RollEngine::new(random, clock), configurations, history);
        let settings_service = SettingsService::new(settings);

        Self {
            config,
            storage,
            dice_service,
            settings_service,
        }
    }
}
