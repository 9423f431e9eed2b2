use async_trait::async_trait;
use formwright_core::AppResult;

/// Key-value persistence port holding the serialized builder state.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> AppResult<()>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
