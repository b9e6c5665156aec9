//! Domain entities - Core business objects with identity

mod configuration;
mod roll_result;

pub use configuration::DiceConfiguration;
pub use roll_result::RollResult;
