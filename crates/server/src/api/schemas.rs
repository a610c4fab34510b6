use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use foyer_expose::ExposeSettings;

/// Error payload for every failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Short human-readable description of the failure.
    #[schema(example = "The configuration (system.site) is not yet exposed by admin.")]
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status indicator.
    #[schema(example = "ok")]
    pub status: String,
}

/// Confirmation payload after a successful contact dispatch.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    /// Fixed confirmation text.
    #[schema(example = "Your message has been sent.")]
    pub message: String,
}

/// Request body for saving the exposure allow-list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitSettingsRequest {
    /// The complete new selection; replaces the stored list wholesale.
    #[schema(example = json!(["system.site", "config_expose.settings"]))]
    pub selected: Vec<String>,
}

/// The persisted allow-list as returned by the admin endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SettingsResponse {
    /// Ordered, unique config names currently exposed.
    #[schema(example = json!(["system.site"]))]
    pub selected_configs: Vec<String>,
}

impl From<ExposeSettings> for SettingsResponse {
    fn from(settings: ExposeSettings) -> Self {
        Self {
            selected_configs: settings
                .selected_configs
                .into_iter()
                .map(|name| name.as_str().to_owned())
                .collect(),
        }
    }
}
