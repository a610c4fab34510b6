use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use foyer_core::ConfigName;
use foyer_store::config::ConfigStore;
use foyer_store::error::StoreError;

use crate::settings::{ExposeSettings, SettingsRepository};

/// One checkbox in the admin settings form: a known config name and whether
/// it is currently selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FormOption {
    /// The config name this option stands for.
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "system.site"))]
    pub name: ConfigName,
    /// Whether the name is on the current allow-list.
    pub selected: bool,
}

/// The admin settings form: every known config name as a multi-select,
/// pre-checked from the current allow-list.
#[derive(Clone)]
pub struct SettingsForm {
    store: Arc<dyn ConfigStore>,
    repo: SettingsRepository,
}

impl std::fmt::Debug for SettingsForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsForm").finish_non_exhaustive()
    }
}

impl SettingsForm {
    /// Build the form over the given config store.
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        let repo = SettingsRepository::new(Arc::clone(&store));
        Self { store, repo }
    }

    /// The full option list: every stored config name, flagged with its
    /// current selection state.
    pub async fn options(&self) -> Result<Vec<FormOption>, StoreError> {
        let settings = self.repo.load().await?;
        let names = self.store.list().await?;

        Ok(names
            .into_iter()
            .map(|name| {
                let selected = settings.allows(&name);
                FormOption { name, selected }
            })
            .collect())
    }

    /// Persist a submitted selection as the complete new allow-list.
    ///
    /// Empty entries are dropped and duplicates collapse to their first
    /// occurrence; whatever remains replaces the prior value wholesale. The
    /// submitted names are trusted against the rendered option set and not
    /// re-validated against the store.
    #[instrument(skip(self, selection))]
    pub async fn submit(&self, selection: Vec<String>) -> Result<ExposeSettings, StoreError> {
        let mut selected_configs: Vec<ConfigName> = Vec::new();
        for entry in selection {
            if entry.is_empty() {
                continue;
            }
            let name = ConfigName::from(entry);
            if !selected_configs.contains(&name) {
                selected_configs.push(name);
            }
        }

        let settings = ExposeSettings { selected_configs };
        self.repo.save(&settings).await?;
        info!(count = settings.selected_configs.len(), "exposure allow-list saved");
        Ok(settings)
    }
}
