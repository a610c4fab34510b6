use serde::Deserialize;

/// The wire shape of a contact-form submission.
///
/// Every field is optional at this layer so the pipeline owns the
/// missing-field policy instead of the JSON decoder.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContactSubmission {
    /// Directory id of the user to contact.
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "42"))]
    pub recipient: Option<String>,

    /// Subject line.
    pub subject: Option<String>,

    /// Message body.
    pub message: Option<String>,

    /// Ask for a copy of the outgoing mail. The flag counts as set when the
    /// field is present with any non-null value, regardless of the value
    /// itself.
    #[cfg_attr(feature = "openapi", schema(value_type = Option<bool>))]
    pub copy: Option<serde_json::Value>,
}

impl ContactSubmission {
    /// Whether the sender asked for a copy: field present and non-null.
    #[must_use]
    pub fn wants_copy(&self) -> bool {
        self.copy.as_ref().is_some_and(|v| !v.is_null())
    }
}
