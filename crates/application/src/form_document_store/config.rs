/// Storage key the form builder state is persisted under by default.
pub const DEFAULT_STORAGE_KEY: &str = "form-builder-storage";

/// Form document store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDocumentStoreConfig {
    storage_key: String,
}

impl FormDocumentStoreConfig {
    /// Creates a config persisting under a custom key.
    #[must_use]
    pub fn new(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
        }
    }

    /// Returns the key the state blob is stored under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        self.storage_key.as_str()
    }
}

impl Default for FormDocumentStoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_KEY)
    }
}
