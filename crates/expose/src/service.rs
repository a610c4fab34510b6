use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use foyer_core::{ApiError, ConfigName};
use foyer_store::config::ConfigStore;

use crate::settings::SettingsRepository;

/// Read side of the config exposure feature.
///
/// Allow-list membership is the sole access-control mechanism: it doubles as
/// the existence check, and there is no deeper permission model behind it.
/// The allow-list read is not transactional with concurrent admin updates;
/// a list change between check and fetch is accepted.
#[derive(Clone)]
pub struct ExposeService {
    store: Arc<dyn ConfigStore>,
    repo: SettingsRepository,
}

impl std::fmt::Debug for ExposeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExposeService").finish_non_exhaustive()
    }
}

impl ExposeService {
    /// Build the service over the given config store.
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        let repo = SettingsRepository::new(Arc::clone(&store));
        Self { store, repo }
    }

    /// The current allow-list, exactly as persisted.
    ///
    /// An empty or absent allow-list is rejected as a bad request: it is
    /// indistinguishable from "feature not configured" and both read the
    /// same to a client.
    #[instrument(skip(self))]
    pub async fn exposed_names(&self) -> Result<Vec<ConfigName>, ApiError> {
        let settings = self.repo.load().await?;

        if settings.selected_configs.is_empty() {
            return Err(ApiError::BadRequest(
                "Admin has not allowed any configs to be exposed.".to_owned(),
            ));
        }

        Ok(settings.selected_configs)
    }

    /// The raw data of one allow-listed config, wrapped as `{ name: data }`.
    ///
    /// Returns the full untransformed document; nothing is redacted. A name
    /// that is allow-listed but no longer stored reads as an empty object.
    #[instrument(skip(self), fields(config = %name))]
    pub async fn exposed_config(&self, name: &ConfigName) -> Result<Value, ApiError> {
        let settings = self.repo.load().await?;

        if !settings.allows(name) {
            return Err(ApiError::BadRequest(format!(
                "The configuration ({name}) is not yet exposed by admin."
            )));
        }

        let data = self
            .store
            .get(name)
            .await
            .map_err(ApiError::from)?
            .unwrap_or_else(|| Value::Object(Map::new()));
        debug!("exposing raw config data");

        let mut wrapped = Map::new();
        wrapped.insert(name.as_str().to_owned(), data);
        Ok(Value::Object(wrapped))
    }
}
