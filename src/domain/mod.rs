//! Domain layer - Core dice model with no storage or I/O dependencies
//!
//! This layer contains:
//! - Entities: DiceConfiguration, RollResult
//! - Value Objects: Die, identifiers, roll requests, settings, statistics
//! - Domain Services: formula rendering, parsing and validation

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
