//! Application configuration

use std::env;

use anyhow::{bail, Context, Result};

use crate::application::stores::DEFAULT_HISTORY_LIMIT;

/// Which storage adapter backs the stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    Sqlite,
}

impl std::str::FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => bail!("Unknown storage backend '{}', expected 'sqlite' or 'memory'", other),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub kind: StorageKind,
    /// SQLite database file (ignored for the memory backend)
    pub database_path: String,
    /// Prepended to every storage key, to keep several profiles in one database
    pub key_prefix: String,
}

impl StorageConfig {
    /// Full storage key for a collection
    pub fn key(&self, base: &str) -> String {
        format!("{}{}", self.key_prefix, base)
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageConfig,
    /// Maximum number of rolls kept in history
    pub history_limit: usize,
    /// Seed for reproducible rolls; OS randomness when unset
    pub random_seed: Option<u64>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind: StorageKind = lookup("DICEY_STORAGE_BACKEND")
            .unwrap_or_else(|| "sqlite".to_string())
            .parse()
            .context("DICEY_STORAGE_BACKEND is invalid")?;

        let history_limit: usize = match lookup("DICEY_HISTORY_LIMIT") {
            Some(value) => value
                .trim()
                .parse()
                .context("DICEY_HISTORY_LIMIT must be a positive integer")?,
            None => DEFAULT_HISTORY_LIMIT,
        };
        if history_limit == 0 {
            bail!("DICEY_HISTORY_LIMIT must be at least 1");
        }

        let random_seed = lookup("DICEY_RANDOM_SEED")
            .map(|value| value.trim().parse::<u64>())
            .transpose()
            .context("DICEY_RANDOM_SEED must be an unsigned integer")?;

        Ok(Self {
            storage: StorageConfig {
                kind,
                database_path: lookup("DICEY_DATABASE_PATH")
                    .unwrap_or_else(|| "dicey.db".to_string()),
                key_prefix: lookup("DICEY_KEY_PREFIX").unwrap_or_default(),
            },
            history_limit,
            random_seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.storage.kind, StorageKind::Sqlite);
        assert_eq!(config.storage.database_path, "dicey.db");
        assert_eq!(config.storage.key("dicey_roll_history"), "dicey_roll_history");
        assert_eq!(config.history_limit, 1000);
        assert_eq!(config.random_seed, None);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DICEY_STORAGE_BACKEND", "Memory"),
            ("DICEY_HISTORY_LIMIT", "50"),
            ("DICEY_KEY_PREFIX", "@"),
            ("DICEY_RANDOM_SEED", "7"),
        ])
        .unwrap();
        assert_eq!(config.storage.kind, StorageKind::Memory);
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.storage.key("dicey_configurations"), "@dicey_configurations");
        assert_eq!(config.random_seed, Some(7));
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("DICEY_STORAGE_BACKEND", "redis")]).is_err());
        assert!(load(&[("DICEY_HISTORY_LIMIT", "many")]).is_err());
        assert!(load(&[("DICEY_HISTORY_LIMIT", "0")]).is_err());
        assert!(load(&[("DICEY_RANDOM_SEED", "-1")]).is_err());
    }
}
