//! RollResult entity - Immutable record of one roll of a configuration
//!
//! A roll snapshots the configuration's identity and dice at roll time so that later
//! edits or deletes of the configuration do not alter history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ConfigurationId, Die, RollId};

/// The outcome of rolling one configuration at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredRollResult")]
pub struct RollResult {
    pub id: RollId,
    pub configuration_id: ConfigurationId,
    pub configuration_name: String,
    pub dice: Vec<Die>,
    /// One entry per die group, each holding one face value per unit of quantity
    pub results: Vec<Vec<u32>>,
    /// Effective modifier per die group (0 when modifiers were disabled)
    pub modifiers: Vec<i32>,
    pub total: i64,
    pub timestamp: DateTime<Utc>,
}

/// Persisted shape; `modifiers` is absent in records written before modifiers existed
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRollResult {
    id: RollId,
    configuration_id: ConfigurationId,
    configuration_name: String,
    dice: Vec<Die>,
    results: Vec<Vec<u32>>,
    #[serde(default)]
    modifiers: Option<Vec<i32>>,
    total: i64,
    timestamp: DateTime<Utc>,
}

impl From<StoredRollResult> for RollResult {
    fn from(stored: StoredRollResult) -> Self {
        let modifiers = stored
            .modifiers
            .unwrap_or_else(|| vec![0; stored.dice.len()]);
        Self {
            id: stored.id,
            configuration_id: stored.configuration_id,
            configuration_name: stored.configuration_name,
            dice: stored.dice,
            results: stored.results,
            modifiers,
            total: stored.total,
            timestamp: stored.timestamp,
        }
    }
}

impl RollResult {
    /// Sum of face values per die group, excluding modifiers
    pub fn group_sums(&self) -> Vec<i64> {
        self.results
            .iter()
            .map(|faces| faces.iter().map(|&face| i64::from(face)).sum())
            .collect()
    }

    /// Sum of all effective modifiers
    pub fn modifier_total(&self) -> i64 {
        self.modifiers.iter().map(|&m| i64::from(m)).sum()
    }

    /// Check the structural invariants: parallel lengths, per-group counts and total
    pub fn is_consistent(&self) -> bool {
        self.results.len() == self.dice.len()
            && self.modifiers.len() == self.dice.len()
            && self
                .results
                .iter()
                .zip(&self.dice)
                .all(|(faces, die)| faces.len() as u64 == u64::from(die.quantity))
            && self.total == self.group_sums().iter().sum::<i64>() + self.modifier_total()
    }

    /// Format as a breakdown string (e.g., "2D6[3, 4] + 1D20[12]-3 = 16")
    pub fn breakdown(&self) -> String {
        let groups: Vec<String> = self
            .dice
            .iter()
            .enumerate()
            .map(|(i, die)| {
                let faces = self
                    .results
                    .get(i)
                    .map(|faces| {
                        faces
                            .iter()
                            .map(|face| face.to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .unwrap_or_default();
                let modifier = self.modifiers.get(i).copied().unwrap_or(0);
                let mut group = format!("{}D{}[{}]", die.quantity, die.sides, faces);
                if modifier > 0 {
                    group.push_str(&format!("+{}", modifier));
                } else if modifier < 0 {
                    group.push_str(&modifier.to_string());
                }
                group
            })
            .collect();
        format!("{} = {}", groups.join(" + "), self.total)
    }
}
