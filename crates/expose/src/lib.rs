pub mod form;
pub mod service;
pub mod settings;

pub use form::{FormOption, SettingsForm};
pub use service::ExposeService;
pub use settings::{CACHE_TAG, ExposeSettings, SETTINGS_KEY, SettingsRepository};
