//! User settings value object
//!
//! Persisted as JSON under its own storage key. Only `modifiers_enabled` affects the
//! roll model; the other toggles are carried for presentation layers.

use serde::{Deserialize, Serialize};

/// Presentation and rolling toggles chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiceSettings {
    pub sound_enabled: bool,
    pub animation_enabled: bool,
    /// Whether per-group modifiers count toward roll totals
    pub modifiers_enabled: bool,
}

impl Default for DiceSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            animation_enabled: true,
            modifiers_enabled: true,
        }
    }
}
