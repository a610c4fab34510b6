use serde::{Deserialize, Serialize};

/// The authenticated caller on whose behalf a request runs.
///
/// Sender identity on outgoing messages always comes from here, never from
/// the request body, so clients cannot spoof another account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// Display name of the account.
    pub name: String,
    /// Email address of the account.
    pub email: String,
}

impl Caller {
    /// Build a caller identity from a name and email pair.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// The identity used when authentication is disabled.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            name: "anonymous".to_owned(),
            email: String::new(),
        }
    }
}
