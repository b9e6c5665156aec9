//! Strongly-typed identifiers for domain entities
//!
//! Identifiers are string-backed: fresh ones are UUID v4 strings, but ids written
//! by earlier clients (short base-36 tokens) must still load, so no format is enforced.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self::from_uuid(uuid)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_id!(ConfigurationId);
define_id!(RollId);

/// Id used for unsaved Quick Roll configurations
pub const QUICK_ROLL_ID: &str = "temp";

/// Display name used for unsaved Quick Roll configurations
pub const QUICK_ROLL_NAME: &str = "Quick Roll";

impl ConfigurationId {
    /// The sentinel id of an unsaved configuration
    pub fn quick_roll() -> Self {
        Self(QUICK_ROLL_ID.to_string())
    }

    pub fn is_quick_roll(&self) -> bool {
        self.0 == QUICK_ROLL_ID
    }
}
