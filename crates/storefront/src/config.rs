//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STUDIO_STORAGE_DIR` - Directory for the persisted cart (default: in-memory only)
//! - `STUDIO_CART_KEY` - Record key for the cart (default: `studio_cart`)
//! - `STUDIO_TOAST_MS` - "Added to Bag" toast duration in milliseconds (default: 2000)
//! - `STUDIO_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)
//! - `RUST_LOG` - Tracing filter (default: `studio_storefront=info,studio_core=info`)

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::storage::{
    CartStorage, DEFAULT_CART_KEY, FileRecordStore, MemoryRecordStore, RecordCartStorage,
    validate_key,
};
use crate::toast::DEFAULT_TOAST_DURATION;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for persisted records; `None` keeps the cart in memory
    pub storage_dir: Option<PathBuf>,
    /// Record key the cart is stored under
    pub cart_key: String,
    /// How long the "Added to Bag" toast stays visible
    pub toast_duration: Duration,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            cart_key: DEFAULT_CART_KEY.to_string(),
            toast_duration: DEFAULT_TOAST_DURATION,
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_dir = lookup("STUDIO_STORAGE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let cart_key = lookup("STUDIO_CART_KEY").unwrap_or(defaults.cart_key);
        validate_key(&cart_key)
            .map_err(|e| ConfigError::InvalidEnvVar("STUDIO_CART_KEY".to_string(), e.to_string()))?;

        let toast_duration = match lookup("STUDIO_TOAST_MS") {
            Some(raw) => raw.trim().parse::<u64>().map(Duration::from_millis).map_err(|e| {
                ConfigError::InvalidEnvVar("STUDIO_TOAST_MS".to_string(), e.to_string())
            })?,
            None => defaults.toast_duration,
        };

        let log_format = match lookup("STUDIO_LOG_FORMAT") {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::InvalidEnvVar("STUDIO_LOG_FORMAT".to_string(), e))?,
            None => defaults.log_format,
        };

        Ok(Self {
            storage_dir,
            cart_key,
            toast_duration,
            log_format,
        })
    }

    /// Build the cart storage port this configuration describes.
    #[must_use]
    pub fn cart_storage(&self) -> Arc<dyn CartStorage> {
        match &self.storage_dir {
            Some(dir) => Arc::new(RecordCartStorage::with_key(
                FileRecordStore::new(dir),
                self.cart_key.clone(),
            )),
            None => Arc::new(RecordCartStorage::with_key(
                MemoryRecordStore::new(),
                self.cart_key.clone(),
            )),
        }
    }
}
