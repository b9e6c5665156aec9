//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Storage: in-memory and SQLite key/value adapters
//! - Random: OS-backed and seeded randomness, wall clock
//! - Config: Application configuration
//! - State: Shared application state
//! - CLI: Command line front-end

pub mod cli;
pub mod config;
pub mod random;
pub mod state;
pub mod storage;
