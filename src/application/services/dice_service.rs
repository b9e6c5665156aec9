//! Dice Service - Application service for rolling and saving dice
//!
//! This service composes the roll engine with the configuration and history
//! stores. Rolling always records the result before returning, so a history
//! listing made right after a roll includes it.

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::StorageError;
use crate::application::services::RollEngine;
use crate::application::stores::{ConfigurationStore, HistoryStore};
use crate::domain::entities::{DiceConfiguration, RollResult};
use crate::domain::errors::DiceError;
use crate::domain::services::{format_configuration, is_valid_configuration};
use crate::domain::value_objects::{ConfigurationId, Die, RollRequest, RollStatistics};

/// Errors surfaced to the presentation layer
#[derive(Debug, thiserror::Error)]
pub enum DiceServiceError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error(transparent)]
    Dice(#[from] DiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Dice service trait defining the application use cases
#[async_trait]
pub trait DiceRollService: Send + Sync {
    /// Roll the requested dice and append the result to history
    async fn roll_and_record(
        &self,
        request: RollRequest,
        modifiers_enabled: bool,
    ) -> Result<RollResult, DiceServiceError>;

    /// Save a named configuration
    async fn save_configuration(
        &self,
        name: &str,
        dice: Vec<Die>,
    ) -> Result<DiceConfiguration, DiceServiceError>;

    /// List saved configurations in creation order
    async fn list_configurations(&self) -> Vec<DiceConfiguration>;

    /// Find a saved configuration by id
    async fn get_configuration(&self, id: &ConfigurationId) -> Option<DiceConfiguration>;

    /// Delete a saved configuration, returning whether it existed; unknown ids are ignored
    async fn delete_configuration(&self, id: &ConfigurationId) -> Result<bool, DiceServiceError>;

    /// List roll history, most recent first
    async fn list_history(&self) -> Vec<RollResult>;

    /// Remove all roll history
    async fn clear_history(&self) -> Result<(), DiceServiceError>;

    /// Summary statistics over the roll history, if any rolls exist
    async fn statistics(&self) -> Option<RollStatistics>;
}

/// Default implementation of DiceRollService
pub struct DiceRollServiceImpl {
    engine: RollEngine,
    configurations: ConfigurationStore,
    history: HistoryStore,
}

impl DiceRollServiceImpl {
    pub fn new(
        engine: RollEngine,
        configurations: ConfigurationStore,
        history: HistoryStore,
    ) -> Self {
        Self {
            engine,
            configurations,
            history,
        }
    }

    fn validate_dice(dice: &[Die]) -> Result<(), DiceServiceError> {
        if dice.is_empty() {
            return Err(DiceServiceError::InvalidConfiguration(
                "at least one die group is required".to_string(),
            ));
        }
        if !is_valid_configuration(dice) {
            return Err(DiceServiceError::InvalidConfiguration(format!(
                "every die group needs a positive quantity and side count: {}",
                format_configuration(dice)
            )));
        }
        Ok(())
    }

    fn validate_name(name: &str) -> Result<(), DiceServiceError> {
        if name.trim().is_empty() {
            return Err(DiceServiceError::InvalidConfiguration(
                "configuration name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DiceRollService for DiceRollServiceImpl {
    #[instrument(skip(self, request))]
    async fn roll_and_record(
        &self,
        request: RollRequest,
        modifiers_enabled: bool,
    ) -> Result<RollResult, DiceServiceError> {
        Self::validate_dice(request.dice())?;

        let configuration = request.into_configuration(self.engine.now());
        let result = self.engine.roll(&configuration, modifiers_enabled)?;
        self.history.append(&result).await?;

        info!(
            roll_id = %result.id,
            configuration = %configuration.name,
            total = result.total,
            "Rolled {}",
            format_configuration(&configuration.dice)
        );
        Ok(result)
    }

    #[instrument(skip(self, dice))]
    async fn save_configuration(
        &self,
        name: &str,
        dice: Vec<Die>,
    ) -> Result<DiceConfiguration, DiceServiceError> {
        Self::validate_name(name)?;
        Self::validate_dice(&dice)?;

        Ok(self.configurations.create(name.trim(), dice).await?)
    }

    #[instrument(skip(self))]
    async fn list_configurations(&self) -> Vec<DiceConfiguration> {
        debug!("Listing configurations");
        self.configurations.list().await
    }

    #[instrument(skip(self))]
    async fn get_configuration(&self, id: &ConfigurationId) -> Option<DiceConfiguration> {
        self.configurations
            .list()
            .await
            .into_iter()
            .find(|configuration| &configuration.id == id)
    }

    #[instrument(skip(self))]
    async fn delete_configuration(&self, id: &ConfigurationId) -> Result<bool, DiceServiceError> {
        Ok(self.configurations.delete(id).await?)
    }

    #[instrument(skip(self))]
    async fn list_history(&self) -> Vec<RollResult> {
        debug!("Listing roll history");
        self.history.list().await
    }

    #[instrument(skip(self))]
    async fn clear_history(&self) -> Result<(), DiceServiceError> {
        Ok(self.history.clear().await?)
    }

    #[instrument(skip(self))]
    async fn statistics(&self) -> Option<RollStatistics> {
        RollStatistics::from_history(&self.history.list().await)
    }
}
