use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use foyer_core::ApiError;
use foyer_expose::FormOption;

use crate::error::ServerError;

use super::AppState;
use super::schemas::{ErrorResponse, SettingsResponse, SubmitSettingsRequest};

/// `GET /admin/expose-settings` -- the settings form model.
///
/// Every known config name paired with its current selection state, the way
/// the admin UI renders its checkbox list.
#[utoipa::path(
    get,
    path = "/admin/expose-settings",
    tag = "Admin",
    summary = "Exposure form options",
    description = "Returns every stored configuration name with its current selection state.",
    responses(
        (status = 200, description = "The checkbox model", body = Vec<FormOption>)
    )
)]
pub async fn expose_options(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServerError> {
    let options = state.form.options().await.map_err(ApiError::from)?;
    Ok((StatusCode::OK, Json(options)))
}

/// `PUT /admin/expose-settings` -- save a new allow-list.
///
/// The submitted selection replaces the stored list wholesale; there is no
/// partial update.
#[utoipa::path(
    put,
    path = "/admin/expose-settings",
    tag = "Admin",
    summary = "Save exposure selection",
    description = "Persists the submitted selection as the complete new allow-list and returns the stored record.",
    request_body(content = SubmitSettingsRequest, description = "The complete new selection"),
    responses(
        (status = 200, description = "The stored allow-list", body = SettingsResponse),
        (status = 500, description = "Settings could not be persisted", body = ErrorResponse)
    )
)]
pub async fn expose_submit(
    State(state): State<AppState>,
    Json(request): Json<SubmitSettingsRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let settings = state
        .form
        .submit(request.selected)
        .await
        .map_err(ApiError::from)?;
    Ok((StatusCode::OK, Json(SettingsResponse::from(settings))))
}
