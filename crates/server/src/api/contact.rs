use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};

use foyer_contact::ContactSubmission;

use crate::auth::CallerIdentity;
use crate::error::ServerError;

use super::AppState;
use super::schemas::{ContactResponse, ErrorResponse};

/// `POST /api/contact-user` -- submit the personal contact form.
///
/// Sender identity comes from the authenticated caller, never from the body.
#[utoipa::path(
    post,
    path = "/api/contact-user",
    tag = "Contact",
    summary = "Contact a user",
    description = "Validates the submission, persists a message record, and dispatches mail to the recipient.",
    request_body(content = ContactSubmission, description = "Contact form fields"),
    responses(
        (status = 200, description = "Message persisted and mail dispatched", body = ContactResponse),
        (status = 401, description = "Missing or invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation failure", body = ErrorResponse),
        (status = 500, description = "Mail dispatch failed", body = ErrorResponse)
    )
)]
pub async fn contact_user(
    State(state): State<AppState>,
    Extension(identity): Extension<CallerIdentity>,
    Json(submission): Json<ContactSubmission>,
) -> Result<impl IntoResponse, ServerError> {
    let caller = identity.to_caller();
    state.contact.dispatch(&submission, &caller).await?;

    Ok((
        StatusCode::OK,
        Json(ContactResponse {
            message: "Your message has been sent.".to_owned(),
        }),
    ))
}
