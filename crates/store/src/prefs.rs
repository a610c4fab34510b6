use async_trait::async_trait;

use foyer_core::UserId;

use crate::error::StoreError;

/// Read-only access to per-user preference flags.
///
/// Preferences are namespaced by module, mirroring how the platform stores
/// them: the contact feature reads `("contact", "enabled")`.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Fetch the preference value stored for `user` under `module`/`key`.
    /// Returns `None` when the preference was never set.
    async fn get(
        &self,
        user: &UserId,
        module: &str,
        key: &str,
    ) -> Result<Option<serde_json::Value>, StoreError>;
}
