use async_trait::async_trait;

use foyer_core::{UserAccount, UserId};

use crate::error::StoreError;

/// Read-only access to the platform's user directory.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Load the account stored under `id`. Returns `None` when no such
    /// account exists.
    async fn load(&self, id: &UserId) -> Result<Option<UserAccount>, StoreError>;
}
