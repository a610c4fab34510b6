pub mod config;
pub mod error;
pub mod smtp;
pub mod transport;

pub use config::MailConfig;
pub use error::MailError;
pub use smtp::SmtpMailer;
pub use transport::{LogMailer, MailTransport};
