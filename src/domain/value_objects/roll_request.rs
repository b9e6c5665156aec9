//! Roll input - either an ad hoc set of dice or a saved configuration

use chrono::{DateTime, Utc};

use crate::domain::entities::DiceConfiguration;
use crate::domain::value_objects::Die;

/// What the caller asked to roll
#[derive(Debug, Clone, PartialEq)]
pub enum RollRequest {
    /// Unsaved dice from the builder, rolled under the Quick Roll identity
    QuickRoll(Vec<Die>),
    /// A previously saved configuration
    Saved(DiceConfiguration),
}

impl RollRequest {
    /// The dice this request will roll
    pub fn dice(&self) -> &[Die] {
        match self {
            Self::QuickRoll(dice) => dice,
            Self::Saved(configuration) => &configuration.dice,
        }
    }

    /// Normalize into the configuration the roll engine consumes
    pub fn into_configuration(self, now: DateTime<Utc>) -> DiceConfiguration {
        match self {
            Self::QuickRoll(dice) => DiceConfiguration::quick_roll(dice, now),
            Self::Saved(configuration) => configuration,
        }
    }
}

impl From<Vec<Die>> for RollRequest {
    fn from(dice: Vec<Die>) -> Self {
        Self::QuickRoll(dice)
    }
}

impl From<DiceConfiguration> for RollRequest {
    fn from(configuration: DiceConfiguration) -> Self {
        Self::Saved(configuration)
    }
}
