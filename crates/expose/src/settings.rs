use std::sync::Arc;

use serde::{Deserialize, Serialize};

use foyer_core::ConfigName;
use foyer_store::config::ConfigStore;
use foyer_store::error::StoreError;

/// Well-known name of the configuration object holding the allow-list.
pub const SETTINGS_KEY: &str = "config_expose.settings";

/// Cache-invalidation tag shared by every response derived from the
/// allow-list. Downstream caches drop those responses when the admin changes
/// the list; a change to an underlying config document does not touch the
/// tag, which is an accepted staleness trade-off.
pub const CACHE_TAG: &str = "config:config_expose.settings";

/// The admin-curated allow-list of exposable configuration names.
///
/// A singleton record persisted in the config store itself under
/// [`SETTINGS_KEY`]. Created implicitly on first save and replaced wholesale
/// on every save; an absent record reads as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposeSettings {
    /// Ordered, unique names permitted to be read via the public endpoints.
    #[serde(default)]
    pub selected_configs: Vec<ConfigName>,
}

impl ExposeSettings {
    /// Whether `name` is on the allow-list.
    #[must_use]
    pub fn allows(&self, name: &ConfigName) -> bool {
        self.selected_configs.contains(name)
    }
}

/// Narrow repository over the settings record.
///
/// The only component that reads or writes [`SETTINGS_KEY`]; everything else
/// goes through here rather than touching the config store directly.
#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn ConfigStore>,
}

impl std::fmt::Debug for SettingsRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsRepository").finish_non_exhaustive()
    }
}

impl SettingsRepository {
    /// Create a repository over the given config store.
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Load the current settings. An absent record, or a record without the
    /// `selected_configs` field, reads as an empty list.
    pub async fn load(&self) -> Result<ExposeSettings, StoreError> {
        let key = ConfigName::from(SETTINGS_KEY);
        match self.store.get(&key).await? {
            Some(raw) => serde_json::from_value(raw)
                .map_err(|e| StoreError::Serialization(e.to_string())),
            None => Ok(ExposeSettings::default()),
        }
    }

    /// Persist `settings`, fully replacing the prior record.
    pub async fn save(&self, settings: &ExposeSettings) -> Result<(), StoreError> {
        let key = ConfigName::from(SETTINGS_KEY);
        let raw = serde_json::to_value(settings)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.put(&key, raw).await
    }
}
