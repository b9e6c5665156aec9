//! Domain errors

use thiserror::Error;

/// Errors raised while rolling dice
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    /// A die must have at least one face
    #[error("Die must have at least one side, got {sides}")]
    InvalidSides { sides: u32 },
}
