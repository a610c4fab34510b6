use std::sync::Arc;

use tracing::{info, instrument, warn};

use foyer_core::{ApiError, Caller, Message, UserId};
use foyer_mail::transport::MailTransport;
use foyer_store::messages::MessageStore;
use foyer_store::prefs::PreferenceStore;
use foyer_store::users::UserStore;

use crate::submission::ContactSubmission;

/// Module and key of the per-user opt-out flag.
const CONTACT_MODULE: &str = "contact";
const ENABLED_KEY: &str = "enabled";

/// The contact dispatch pipeline.
///
/// A linear validation pipeline where the first failure wins: field checks,
/// recipient lookup, opt-out check, then persist and deliver. No retries; a
/// mail failure after the message is persisted is surfaced as a 500 without
/// rolling the message back.
#[derive(Clone)]
pub struct ContactService {
    users: Arc<dyn UserStore>,
    prefs: Arc<dyn PreferenceStore>,
    messages: Arc<dyn MessageStore>,
    mailer: Arc<dyn MailTransport>,
}

impl std::fmt::Debug for ContactService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactService").finish_non_exhaustive()
    }
}

impl ContactService {
    /// Wire the pipeline to its collaborators.
    pub fn new(
        users: Arc<dyn UserStore>,
        prefs: Arc<dyn PreferenceStore>,
        messages: Arc<dyn MessageStore>,
        mailer: Arc<dyn MailTransport>,
    ) -> Self {
        Self {
            users,
            prefs,
            messages,
            mailer,
        }
    }

    /// Run a submission through the pipeline on behalf of `caller`.
    ///
    /// Returns the persisted message on success. Sender identity on the
    /// message always comes from `caller`, never from the submission.
    #[instrument(skip(self, submission, caller), fields(sender = %caller.name))]
    pub async fn dispatch(
        &self,
        submission: &ContactSubmission,
        caller: &Caller,
    ) -> Result<Message, ApiError> {
        let (recipient, subject, body) = required_fields(submission)?;
        let recipient = UserId::from(recipient);

        // The recipient must exist in the directory.
        if self.users.load(&recipient).await.map_err(ApiError::from)?.is_none() {
            return Err(ApiError::Unprocessable(
                "recipient does not exist".to_owned(),
            ));
        }

        // Honor the per-user opt-out; an unset flag means enabled.
        let preference = self
            .prefs
            .get(&recipient, CONTACT_MODULE, ENABLED_KEY)
            .await
            .map_err(ApiError::from)?;
        if preference.is_some_and(|v| is_falsy(&v)) {
            return Err(ApiError::Unprocessable(
                "recipient has disabled contact form".to_owned(),
            ));
        }

        let message = Message::personal(
            caller,
            recipient,
            subject,
            body,
            submission.wants_copy(),
        );
        self.messages.create(&message).await.map_err(ApiError::from)?;
        info!(message_id = %message.id, "contact message persisted");

        // The message stays persisted even when delivery fails.
        if let Err(e) = self.mailer.send(&message, caller).await {
            warn!(error = %e, message_id = %message.id, "mail dispatch failed");
            return Err(ApiError::Internal(
                "failed to send email, try again later".to_owned(),
            ));
        }

        info!(message_id = %message.id, "contact mail dispatched");
        Ok(message)
    }
}

/// Extract the three required fields, rejecting absent or empty values.
fn required_fields(submission: &ContactSubmission) -> Result<(&str, &str, &str), ApiError> {
    match (
        non_empty(submission.recipient.as_deref()),
        non_empty(submission.subject.as_deref()),
        non_empty(submission.message.as_deref()),
    ) {
        (Some(recipient), Some(subject), Some(message)) => Ok((recipient, subject, message)),
        _ => Err(ApiError::Unprocessable(
            "recipient, subject or message is missing".to_owned(),
        )),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Whether a preference value reads as an explicit opt-out: `false`, zero,
/// and the strings `""` and `"0"` all disable the form. A JSON `null`
/// counts as unset, not as an opt-out.
fn is_falsy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        serde_json::Value::String(s) => s.is_empty() || s == "0",
        _ => false,
    }
}
