use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use foyer_core::ApiError;

use crate::api::schemas::ErrorResponse;

/// Errors that can occur while running the Foyer server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A request-scoped failure surfaced through the API.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Api(err) => (
                StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                err.to_string(),
            ),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
