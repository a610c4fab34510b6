use async_trait::async_trait;
use dashmap::DashMap;

use foyer_core::UserId;
use foyer_store::error::StoreError;
use foyer_store::prefs::PreferenceStore;

/// In-memory [`PreferenceStore`] keyed by `(user, module, key)`.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    data: DashMap<String, serde_json::Value>,
}

impl MemoryPreferenceStore {
    /// Create a new, empty in-memory preference store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a preference value directly. Handy for seeding.
    pub fn set(&self, user: &UserId, module: &str, key: &str, value: serde_json::Value) {
        self.data.insert(render_key(user, module, key), value);
    }
}

fn render_key(user: &UserId, module: &str, key: &str) -> String {
    format!("{module}:{key}:{user}")
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(
        &self,
        user: &UserId,
        module: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self
            .data
            .get(&render_key(user, module, key))
            .map(|e| e.value().clone()))
    }
}
