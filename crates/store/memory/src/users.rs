use async_trait::async_trait;
use dashmap::DashMap;

use foyer_core::{UserAccount, UserId};
use foyer_store::error::StoreError;
use foyer_store::users::UserStore;

/// In-memory [`UserStore`] keyed by account id.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    accounts: DashMap<String, UserAccount>,
}

impl MemoryUserStore {
    /// Create a new, empty in-memory user directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account. Replaces any account with the same id.
    pub fn add(&self, account: UserAccount) {
        self.accounts.insert(account.id.as_str().to_owned(), account);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn load(&self, id: &UserId) -> Result<Option<UserAccount>, StoreError> {
        Ok(self.accounts.get(id.as_str()).map(|e| e.value().clone()))
    }
}
