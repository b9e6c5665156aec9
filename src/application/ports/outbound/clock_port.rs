//! Testability ports for injecting time and randomness

use chrono::{DateTime, Utc};

use crate::domain::errors::DiceError;

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of die faces
pub trait RandomPort: Send + Sync {
    /// A face value in `[1, sides]`, independent across calls.
    ///
    /// Fails fast with [`DiceError::InvalidSides`] when `sides` is zero.
    fn roll_face(&self, sides: u32) -> Result<u32, DiceError>;
}
