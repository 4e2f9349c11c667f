//! Configuration infrastructure
//!
//! Settings for the inventory core: where the store lives, pool sizing and
//! the listing/expiry defaults callers fall back on. Loaded from a JSON file
//! with the database url overridable from the environment.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Environment override for the database url, useful for tests and CI.
pub const DATABASE_URL_ENV: &str = "INVENTORY_DATABASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    pub database: DatabaseConfig,
    pub listing: ListingConfig,
    pub expiry: ExpiryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Page size used when the caller does not supply one.
    pub default_limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiryConfig {
    /// Window in days for the "expiring soon" scan.
    pub default_window_days: i64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite:data/inventory.db".to_string(),
                max_connections: 10,
            },
            listing: ListingConfig { default_limit: 100 },
            expiry: ExpiryConfig {
                default_window_days: 7,
            },
        }
    }
}

impl InventoryConfig {
    /// Loads configuration from a JSON file, falling back to defaults when
    /// the file does not exist. `INVENTORY_DATABASE_URL` wins over the file.
    pub async fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        } else {
            info!(path = %path.display(), "config file missing, using defaults");
            Self::default()
        };

        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            config.database.url = url;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = InventoryConfig::load(&dir.path().join("missing.json"))
            .await
            .unwrap();
        assert_eq!(config.listing.default_limit, 100);
        assert_eq!(config.expiry.default_window_days, 7);
    }

    #[tokio::test]
    async fn file_values_are_honored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        let custom = InventoryConfig {
            database: DatabaseConfig {
                url: "sqlite:custom.db".into(),
                max_connections: 2,
            },
            listing: ListingConfig { default_limit: 25 },
            expiry: ExpiryConfig {
                default_window_days: 3,
            },
        };
        tokio::fs::write(&path, serde_json::to_string_pretty(&custom).unwrap())
            .await
            .unwrap();

        let loaded = InventoryConfig::load(&path).await.unwrap();
        assert_eq!(loaded.database.url, "sqlite:custom.db");
        assert_eq!(loaded.listing.default_limit, 25);
        assert_eq!(loaded.expiry.default_window_days, 3);
    }
}
