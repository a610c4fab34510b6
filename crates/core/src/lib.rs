pub mod account;
pub mod caller;
pub mod error;
pub mod message;
pub mod types;

pub use account::UserAccount;
pub use caller::Caller;
pub use error::ApiError;
pub use message::Message;
pub use types::{ConfigName, UserId};
