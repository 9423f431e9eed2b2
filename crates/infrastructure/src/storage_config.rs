//! Environment-driven selection of the key-value storage backend.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use formwright_application::KeyValueStore;
use formwright_core::{AppError, AppResult};
use tracing::info;

use crate::{FileKeyValueStore, InMemoryKeyValueStore, RedisKeyValueStore};

/// Redis key prefix used when none is configured.
pub const DEFAULT_REDIS_KEY_PREFIX: &str = "formwright";

/// Storage backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StorageConfig {
    /// Process-local storage, lost on exit.
    #[default]
    Memory,
    /// One file per key under a directory.
    File {
        /// Root directory.
        directory: PathBuf,
    },
    /// Redis strings under a key prefix.
    Redis {
        /// Connection URL.
        url: String,
        /// Prefix prepended to every key.
        key_prefix: String,
    },
}

impl StorageConfig {
    /// Reads the backend selection from process environment variables.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the backend selection through a variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let required_non_empty = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| AppError::Validation(format!("{name} is required")))
        };

        match lookup("FORMWRIGHT_STORAGE_BACKEND")
            .unwrap_or_else(|| "memory".to_owned())
            .trim()
        {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File {
                directory: PathBuf::from(required_non_empty("FORMWRIGHT_STORAGE_DIR")?),
            }),
            "redis" => Ok(Self::Redis {
                url: required_non_empty("REDIS_URL")?,
                key_prefix: lookup("FORMWRIGHT_REDIS_KEY_PREFIX")
                    .filter(|value| !value.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REDIS_KEY_PREFIX.to_owned()),
            }),
            other => Err(AppError::Validation(format!(
                "FORMWRIGHT_STORAGE_BACKEND must be one of 'memory', 'file' or 'redis', got '{other}'"
            ))),
        }
    }
}

/// Builds the key-value store adapter selected by `config`.
pub fn build_key_value_store(config: &StorageConfig) -> AppResult<Arc<dyn KeyValueStore>> {
    match config {
        StorageConfig::Memory => {
            info!("using in-memory form builder storage");
            Ok(Arc::new(InMemoryKeyValueStore::new()))
        }
        StorageConfig::File { directory } => {
            info!(directory = %directory.display(), "using file form builder storage");
            Ok(Arc::new(FileKeyValueStore::new(directory.clone())))
        }
        StorageConfig::Redis { url, key_prefix } => {
            let client = redis::Client::open(url.as_str())
                .map_err(|error| AppError::Validation(format!("invalid REDIS_URL: {error}")))?;
            info!(key_prefix = %key_prefix, "using redis form builder storage");
            Ok(Arc::new(RedisKeyValueStore::new(client, key_prefix.clone())))
        }
    }
}
