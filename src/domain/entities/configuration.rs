//! DiceConfiguration entity - A named, saved collection of die groups

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ConfigurationId, Die, QUICK_ROLL_NAME};

/// A named collection of die groups that can be saved and rolled repeatedly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceConfiguration {
    pub id: ConfigurationId,
    pub name: String,
    /// Roll-grouping order; does not affect the total
    pub dice: Vec<Die>,
    pub created_at: DateTime<Utc>,
}

impl DiceConfiguration {
    pub fn new(name: impl Into<String>, dice: Vec<Die>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ConfigurationId::new(),
            name: name.into(),
            dice,
            created_at,
        }
    }

    /// An unsaved configuration carrying the Quick Roll sentinel identity
    pub fn quick_roll(dice: Vec<Die>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ConfigurationId::quick_roll(),
            name: QUICK_ROLL_NAME.to_string(),
            dice,
            created_at,
        }
    }

    pub fn is_quick_roll(&self) -> bool {
        self.id.is_quick_roll()
    }
}
