//! Redis-backed key-value store.

use async_trait::async_trait;
use formwright_application::KeyValueStore;
use formwright_core::{AppError, AppResult};
use redis::AsyncCommands;

/// Redis implementation of the key-value store port.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    client: redis::Client,
    key_prefix: String,
}

impl RedisKeyValueStore {
    /// Creates a store with a configured Redis client and key prefix.
    #[must_use]
    pub fn new(client: redis::Client, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    fn key_for(&self, key: &str) -> String {
        format!("{}:{key}", self.key_prefix)
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|error| AppError::Internal(format!("failed to connect to redis: {error}")))
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let redis_key = self.key_for(key);
        let mut connection = self.connection().await?;

        connection.get(redis_key).await.map_err(|error| {
            AppError::Internal(format!("failed to read stored value '{key}': {error}"))
        })
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        let redis_key = self.key_for(key);
        let mut connection = self.connection().await?;

        connection.set(redis_key, value).await.map_err(|error| {
            AppError::Internal(format!("failed to write stored value '{key}': {error}"))
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let redis_key = self.key_for(key);
        let mut connection = self.connection().await?;

        connection.del(redis_key).await.map_err(|error| {
            AppError::Internal(format!("failed to delete stored value '{key}': {error}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RedisKeyValueStore;

    #[test]
    fn keys_are_namespaced_by_prefix() {
        let client =
            redis::Client::open("redis://127.0.0.1:6379").unwrap_or_else(|_| unreachable!());
        let store = RedisKeyValueStore::new(client, "formwright");

        assert_eq!(
            store.key_for("form-builder-storage"),
            "formwright:form-builder-storage"
        );
    }
}
