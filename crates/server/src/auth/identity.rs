use foyer_core::Caller;

/// Server-side identity of the authenticated caller, injected as a request
/// extension by the auth middleware.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    /// Display name of the account.
    pub name: String,
    /// Email address of the account.
    pub email: String,
    /// Authentication method (`"token"` or `"anonymous"`).
    pub auth_method: String,
}

impl CallerIdentity {
    /// Identity used when no token table is configured (standalone/dev mode).
    #[must_use]
    pub fn anonymous() -> Self {
        let caller = Caller::anonymous();
        Self {
            name: caller.name,
            email: caller.email,
            auth_method: "anonymous".to_owned(),
        }
    }

    /// Identity established from a matched bearer token.
    #[must_use]
    pub fn from_token(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            auth_method: "token".to_owned(),
        }
    }

    /// Convert to the domain-level [`Caller`] handed to the services.
    #[must_use]
    pub fn to_caller(&self) -> Caller {
        Caller::new(self.name.clone(), self.email.clone())
    }
}
