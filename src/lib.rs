//! Dicey - dice rolling core
//!
//! Rolls groups of polyhedral dice, keeps named configurations and a bounded
//! roll history in a key/value store, and derives statistics from history.

pub mod application;
pub mod domain;
pub mod infrastructure;
