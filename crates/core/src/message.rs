use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::caller::Caller;
use crate::types::UserId;

/// Form type recorded on messages submitted through the personal contact form.
pub const PERSONAL_FORM: &str = "personal";

/// A persisted contact-form submission routed to mail delivery.
///
/// Created once by the contact pipeline and immutable afterwards; the message
/// store is append-only and no update or delete operation exists here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: Uuid,

    /// Which contact form produced the message (always [`PERSONAL_FORM`]).
    pub form: String,

    /// Display name of the authenticated sender.
    pub sender_name: String,

    /// Email address of the authenticated sender.
    pub sender_email: String,

    /// Directory id of the recipient account.
    pub recipient: UserId,

    /// Subject line.
    pub subject: String,

    /// Message body.
    pub body: String,

    /// Whether the sender asked for a copy of the outgoing mail.
    pub copy: bool,

    /// When the message was created.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a personal contact-form message. Generates a UUID-v4 id and
    /// stamps `created_at` with the current time.
    #[must_use]
    pub fn personal(
        sender: &Caller,
        recipient: impl Into<UserId>,
        subject: impl Into<String>,
        body: impl Into<String>,
        copy: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            form: PERSONAL_FORM.to_owned(),
            sender_name: sender.name.clone(),
            sender_email: sender.email.clone(),
            recipient: recipient.into(),
            subject: subject.into(),
            body: body.into(),
            copy,
            created_at: Utc::now(),
        }
    }
}
