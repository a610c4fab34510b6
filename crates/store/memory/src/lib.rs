pub mod config;
pub mod messages;
pub mod prefs;
pub mod users;

pub use config::MemoryConfigStore;
pub use messages::MemoryMessageStore;
pub use prefs::MemoryPreferenceStore;
pub use users::MemoryUserStore;
