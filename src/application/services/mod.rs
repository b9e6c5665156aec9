//! Application services - Use case implementations
//!
//! Services accept their stores and ports as constructor dependencies and return
//! domain entities.

pub mod dice_service;
pub mod roll_engine;
pub mod settings_service;

pub use dice_service::{DiceRollService, DiceRollServiceImpl, DiceServiceError};
pub use roll_engine::RollEngine;
pub use settings_service::SettingsService;
