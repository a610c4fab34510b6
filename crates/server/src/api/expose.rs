use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use foyer_core::ConfigName;
use foyer_expose::CACHE_TAG;

use crate::error::ServerError;

use super::AppState;
use super::schemas::ErrorResponse;

/// `GET /api/config-list` -- the current exposure allow-list.
///
/// The response carries a `Cache-Tag` header bound to the settings record so
/// downstream caches invalidate when the admin changes the list.
#[utoipa::path(
    get,
    path = "/api/config-list",
    tag = "Exposure",
    summary = "List exposed configs",
    description = "Returns the admin-curated list of exposable configuration names, in persisted order.",
    responses(
        (status = 200, description = "The allow-list, order preserved", body = Vec<String>),
        (status = 400, description = "No configurations are exposed", body = ErrorResponse)
    )
)]
pub async fn config_list(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
    let names = state.expose.exposed_names().await?;
    Ok((StatusCode::OK, [("cache-tag", CACHE_TAG)], Json(names)))
}

/// `GET /api/config-get/{conf_name}` -- raw data of one exposed config.
///
/// Allow-list membership is both the authorization and the existence check;
/// anything off the list is a 400 naming the rejected config.
#[utoipa::path(
    get,
    path = "/api/config-get/{conf_name}",
    tag = "Exposure",
    summary = "Read one exposed config",
    description = "Returns the full raw document of an allow-listed configuration, keyed by its name.",
    params(
        ("conf_name" = String, Path, description = "Dotted config name, e.g. system.site")
    ),
    responses(
        (status = 200, description = "The raw document wrapped by name", body = Object),
        (status = 400, description = "Config not on the allow-list", body = ErrorResponse)
    )
)]
pub async fn config_get(
    State(state): State<AppState>,
    Path(conf_name): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let name = ConfigName::from(conf_name);
    let data = state.expose.exposed_config(&name).await?;
    Ok((StatusCode::OK, [("cache-tag", CACHE_TAG)], Json(data)))
}
