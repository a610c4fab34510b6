use serde::Deserialize;

use foyer_mail::MailConfig;

/// Top-level configuration for the Foyer server, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct FoyerConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Config store seeding.
    #[serde(default)]
    pub store: StoreConfig,
    /// Mail delivery configuration.
    #[serde(default)]
    pub mail: MailSection,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Seed entries for the in-memory user directory.
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

/// HTTP server bind configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8080
}

/// Configuration for seeding the in-memory config store.
#[derive(Debug, Default, Deserialize)]
pub struct StoreConfig {
    /// Optional directory of `*.json` documents loaded at startup; the file
    /// stem becomes the config name.
    pub config_dir: Option<String>,
}

/// Mail delivery configuration.
///
/// When disabled (the default), deliveries go to the log-only transport so
/// the contact endpoint stays usable without an SMTP relay.
#[derive(Debug, Default, Deserialize)]
pub struct MailSection {
    /// Whether to deliver over SMTP.
    #[serde(default)]
    pub enabled: bool,
    /// SMTP settings (`[mail.smtp]`), required when `enabled` is true.
    #[serde(default)]
    pub smtp: Option<MailConfig>,
}

/// Authentication configuration: a static bearer-token table.
///
/// With no tokens configured, the contact endpoint accepts anonymous callers
/// (standalone/dev mode).
#[derive(Debug, Default, Deserialize)]
pub struct AuthConfig {
    /// Configured bearer tokens and the principals behind them.
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,
}

/// One configured bearer token.
#[derive(Debug, Deserialize)]
pub struct TokenEntry {
    /// The token value presented in the `Authorization` header.
    pub token: String,
    /// Display name of the principal.
    pub name: String,
    /// Email address of the principal.
    pub email: String,
}

/// A user directory seed entry.
#[derive(Debug, Deserialize)]
pub struct SeedUser {
    /// Directory id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Primary email address.
    pub email: String,
    /// Whether the user accepts contact-form mail. Absent means enabled.
    pub contact_enabled: Option<bool>,
}
