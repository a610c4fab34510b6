use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A user account record as held by the platform directory.
///
/// Read-only from this crate's perspective; account lifecycle is owned by
/// the directory backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Directory identifier for the account.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Primary email address.
    pub email: String,
}

impl UserAccount {
    /// Build an account record.
    #[must_use]
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}
