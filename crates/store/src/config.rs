use async_trait::async_trait;

use foyer_core::ConfigName;

use crate::error::StoreError;

/// A key-value store of named configuration documents.
///
/// The backing engine is external to this workspace; implementations must be
/// `Send + Sync` and safe for concurrent access. Documents are arbitrary JSON
/// and are returned untransformed.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// List the names of every stored configuration object, sorted.
    async fn list(&self) -> Result<Vec<ConfigName>, StoreError>;

    /// Fetch the raw data of one configuration object.
    /// Returns `None` when no object is stored under `name`.
    async fn get(&self, name: &ConfigName) -> Result<Option<serde_json::Value>, StoreError>;

    /// Replace the configuration object stored under `name`, creating it if
    /// it does not exist yet.
    async fn put(&self, name: &ConfigName, data: serde_json::Value) -> Result<(), StoreError>;
}
