//! File-backed key-value store, one JSON file per key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use formwright_application::KeyValueStore;
use formwright_core::{AppError, AppResult};
use tracing::debug;

/// Key-value store writing each value to its own file under a directory.
///
/// Writes go to a temporary sibling file that is renamed over the target, so a
/// reader never observes a partially written value.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    directory: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `directory`. The directory is created on first write.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.directory.as_path()
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        if key.is_empty() {
            return Err(AppError::Validation(
                "storage key must not be empty".to_owned(),
            ));
        }

        if let Some(character) = key.chars().find(|character| {
            !(character.is_ascii_alphanumeric() || matches!(character, '-' | '_' | '.'))
        }) {
            return Err(AppError::Validation(format!(
                "storage key '{key}' contains unsupported character '{character}'"
            )));
        }

        Ok(self.directory.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(AppError::Internal(format!(
                "failed to read '{}': {error}",
                path.display()
            ))),
        }
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to create storage directory '{}': {error}",
                    self.directory.display()
                ))
            })?;

        let staging_path = path.with_extension("json.tmp");
        tokio::fs::write(&staging_path, value.as_bytes())
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to write '{}': {error}",
                    staging_path.display()
                ))
            })?;
        tokio::fs::rename(&staging_path, &path)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to replace '{}': {error}",
                    path.display()
                ))
            })?;

        debug!(path = %path.display(), bytes = value.len(), "stored value written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(AppError::Internal(format!(
                "failed to delete '{}': {error}",
                path.display()
            ))),
        }
    }
}
