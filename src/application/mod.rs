//! Application layer - Use cases over the dice domain
//!
//! This layer contains:
//! - Ports: the storage, clock and randomness capabilities the application needs
//! - Stores: configuration, history and settings collections over the storage port
//! - Services: the roll engine, the dice service facade and settings

pub mod ports;
pub mod services;
pub mod stores;
