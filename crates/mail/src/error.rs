use thiserror::Error;

use foyer_core::ApiError;

/// Errors from building or delivering mail.
#[derive(Debug, Error)]
pub enum MailError {
    /// The mailer itself is misconfigured (e.g. an unparseable from address).
    #[error("mail configuration error: {0}")]
    Configuration(String),

    /// The outgoing message could not be assembled.
    #[error("failed to build mail message: {0}")]
    Message(String),

    /// The recipient could not be resolved to a deliverable address.
    #[error("unresolvable recipient: {0}")]
    Recipient(String),

    /// The SMTP transport refused or failed the delivery.
    #[error("smtp transport error: {0}")]
    Transport(String),
}

impl From<MailError> for ApiError {
    fn from(err: MailError) -> Self {
        Self::Internal(err.to_string())
    }
}
