use async_trait::async_trait;
use dashmap::DashMap;

use foyer_core::ConfigName;
use foyer_store::config::ConfigStore;
use foyer_store::error::StoreError;

/// In-memory [`ConfigStore`] backed by a [`DashMap`].
///
/// Used by tests and by the standalone server, which seeds it from a
/// directory of JSON documents at startup.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    data: DashMap<String, serde_json::Value>,
}

impl MemoryConfigStore {
    /// Create a new, empty in-memory config store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document directly, bypassing the trait. Handy for seeding.
    pub fn insert(&self, name: impl Into<String>, data: serde_json::Value) {
        self.data.insert(name.into(), data);
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn list(&self) -> Result<Vec<ConfigName>, StoreError> {
        let mut names: Vec<String> = self.data.iter().map(|e| e.key().clone()).collect();
        names.sort();
        Ok(names.into_iter().map(ConfigName::from).collect())
    }

    async fn get(&self, name: &ConfigName) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.data.get(name.as_str()).map(|e| e.value().clone()))
    }

    async fn put(&self, name: &ConfigName, data: serde_json::Value) -> Result<(), StoreError> {
        self.data.insert(name.as_str().to_owned(), data);
        Ok(())
    }
}
