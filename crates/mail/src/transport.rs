use async_trait::async_trait;
use tracing::info;

use foyer_core::{Caller, Message};

use crate::error::MailError;

/// Delivers a persisted contact message to its recipient.
///
/// Delivery is a blocking synchronous call from the pipeline's point of view:
/// no timeout or retry is applied here, failures surface immediately to the
/// caller. The persisted message is never rolled back on failure.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver `message`, copying `sender` when the message's copy flag is
    /// set.
    async fn send(&self, message: &Message, sender: &Caller) -> Result<(), MailError>;
}

/// A [`MailTransport`] that only logs deliveries.
///
/// Used when no SMTP relay is configured, so the contact endpoint stays
/// usable in development.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl LogMailer {
    /// Create a log-only mailer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailTransport for LogMailer {
    async fn send(&self, message: &Message, sender: &Caller) -> Result<(), MailError> {
        info!(
            message_id = %message.id,
            recipient = %message.recipient,
            subject = %message.subject,
            sender = %sender.name,
            copy = message.copy,
            "mail delivery skipped (log-only transport)"
        );
        Ok(())
    }
}
