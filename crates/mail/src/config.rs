use serde::{Deserialize, Serialize};

/// Settings for the SMTP mailer.
///
/// Defaults target the STARTTLS submission port (587) with TLS on and no
/// authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,

    /// SMTP server port.
    #[serde(default = "default_port")]
    pub smtp_port: u16,

    /// Optional SMTP username.
    pub username: Option<String>,

    /// Optional SMTP password.
    pub password: Option<String>,

    /// The `From` address on outgoing mail. Contact mail is sent from the
    /// site, with reply-to pointing at the authenticated sender.
    pub from_address: String,

    /// Whether to use STARTTLS.
    #[serde(default = "default_tls")]
    pub tls: bool,
}

fn default_port() -> u16 {
    587
}

fn default_tls() -> bool {
    true
}

impl MailConfig {
    /// Create a config with the given SMTP host and site sender address,
    /// leaving everything else at the defaults.
    pub fn new(smtp_host: impl Into<String>, from_address: impl Into<String>) -> Self {
        Self {
            smtp_host: smtp_host.into(),
            smtp_port: default_port(),
            username: None,
            password: None,
            from_address: from_address.into(),
            tls: default_tls(),
        }
    }

    /// Set SMTP authentication credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Override the SMTP port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.smtp_port = port;
        self
    }

    /// Enable or disable STARTTLS.
    #[must_use]
    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self::new("localhost", "noreply@localhost")
    }
}
