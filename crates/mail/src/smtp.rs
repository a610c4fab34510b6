use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{debug, error, info, instrument};

use foyer_core::{Caller, Message, UserAccount};
use foyer_store::users::UserStore;

use crate::config::MailConfig;
use crate::error::MailError;
use crate::transport::MailTransport;

/// A [`MailTransport`] that delivers contact messages over SMTP via `lettre`.
///
/// The recipient is stored on the message as a directory id; the mailer
/// resolves it to an address through the user directory at send time. Mail is
/// sent from the site address with reply-to pointing at the authenticated
/// sender, and a copy goes back to the sender when the message asks for one.
pub struct SmtpMailer {
    config: MailConfig,
    users: Arc<dyn UserStore>,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("config", &self.config)
            .field("transport", &"<AsyncSmtpTransport>")
            .finish()
    }
}

impl SmtpMailer {
    /// Create a mailer from the given configuration and user directory.
    ///
    /// Returns [`MailError::Configuration`] when the SMTP transport cannot be
    /// built from the config.
    pub fn new(config: MailConfig, users: Arc<dyn UserStore>) -> Result<Self, MailError> {
        let transport = build_transport(&config)?;
        Ok(Self {
            config,
            users,
            transport,
        })
    }

    /// Create a mailer with a pre-built transport, for tests.
    pub fn with_transport(
        config: MailConfig,
        users: Arc<dyn UserStore>,
        transport: AsyncSmtpTransport<Tokio1Executor>,
    ) -> Self {
        Self {
            config,
            users,
            transport,
        }
    }
}

/// Build the async SMTP transport from the mailer configuration.
fn build_transport(
    config: &MailConfig,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
    let builder = if config.tls {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| MailError::Configuration(format!("SMTP TLS relay error: {e}")))?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
    };

    let builder = builder.port(config.smtp_port);

    let builder = if let (Some(user), Some(pass)) = (&config.username, &config.password) {
        builder.credentials(Credentials::new(user.clone(), pass.clone()))
    } else {
        builder
    };

    Ok(builder.build())
}

/// Build the primary outgoing mail for `message`, addressed to the recipient
/// account.
///
/// A free function so it can be tested without a Tokio runtime.
fn build_recipient_mail(
    config: &MailConfig,
    message: &Message,
    recipient: &UserAccount,
    sender: &Caller,
) -> Result<lettre::Message, MailError> {
    let from: Mailbox = config
        .from_address
        .parse()
        .map_err(|e| MailError::Configuration(format!("invalid from address: {e}")))?;

    let to: Mailbox = recipient
        .email
        .parse()
        .map_err(|e| MailError::Recipient(format!("invalid recipient address: {e}")))?;

    let mut builder = lettre::Message::builder()
        .from(from)
        .to(to)
        .subject(&message.subject);

    // Replies should go to the person who filled in the form, not the site.
    if let Ok(reply_to) = sender.email.parse::<Mailbox>() {
        builder = builder.reply_to(reply_to);
    }

    builder
        .body(message.body.clone())
        .map_err(|e| MailError::Message(e.to_string()))
}

/// Build the copy of the outgoing mail that goes back to the sender.
fn build_sender_copy(
    config: &MailConfig,
    message: &Message,
    sender: &Caller,
) -> Result<lettre::Message, MailError> {
    let from: Mailbox = config
        .from_address
        .parse()
        .map_err(|e| MailError::Configuration(format!("invalid from address: {e}")))?;

    let to: Mailbox = sender
        .email
        .parse()
        .map_err(|e| MailError::Recipient(format!("invalid sender copy address: {e}")))?;

    lettre::Message::builder()
        .from(from)
        .to(to)
        .subject(format!("Copy of: {}", message.subject))
        .body(message.body.clone())
        .map_err(|e| MailError::Message(e.to_string()))
}

#[async_trait]
impl MailTransport for SmtpMailer {
    #[instrument(skip(self, message, sender), fields(message_id = %message.id, recipient = %message.recipient))]
    async fn send(&self, message: &Message, sender: &Caller) -> Result<(), MailError> {
        debug!("resolving recipient address");
        let recipient = self
            .users
            .load(&message.recipient)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?
            .ok_or_else(|| {
                MailError::Recipient(format!("no account for recipient {}", message.recipient))
            })?;

        let mail = build_recipient_mail(&self.config, message, &recipient, sender)?;

        info!(to = %recipient.email, subject = %message.subject, "sending contact mail");
        self.transport.send(mail).await.map_err(|e| {
            error!(error = %e, "SMTP send failed");
            map_smtp_error(&e)
        })?;

        if message.copy {
            let copy = build_sender_copy(&self.config, message, sender)?;
            info!(to = %sender.email, "sending sender copy");
            self.transport.send(copy).await.map_err(|e| {
                error!(error = %e, "SMTP send of sender copy failed");
                map_smtp_error(&e)
            })?;
        }

        Ok(())
    }
}

/// Map a lettre SMTP error onto the mailer's error taxonomy.
fn map_smtp_error(error: &lettre::transport::smtp::Error) -> MailError {
    if error.is_permanent() {
        MailError::Message(format!("permanent SMTP error: {error}"))
    } else {
        // Transient, TLS, connection, and response parsing errors.
        MailError::Transport(error.to_string())
    }
}
