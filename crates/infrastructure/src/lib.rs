//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod file_key_value_store;
mod in_memory_key_value_store;
mod redis_key_value_store;
mod storage_config;

pub use file_key_value_store::FileKeyValueStore;
pub use in_memory_key_value_store::InMemoryKeyValueStore;
pub use redis_key_value_store::RedisKeyValueStore;
pub use storage_config::{DEFAULT_REDIS_KEY_PREFIX, StorageConfig, build_key_value_store};
