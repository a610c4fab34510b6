pub mod admin;
pub mod contact;
pub mod expose;
pub mod health;
pub mod openapi;
pub mod schemas;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use foyer_contact::ContactService;
use foyer_expose::{ExposeService, SettingsForm};

use crate::auth::AuthLayer;

use self::openapi::ApiDoc;

/// Shared handler state: the two feature services plus the admin form.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Config exposure read service.
    pub expose: ExposeService,
    /// Admin settings form over the same allow-list.
    pub form: SettingsForm,
    /// Contact dispatch pipeline.
    pub contact: ContactService,
}

/// Build the axum router with all API routes, middleware, and Swagger UI.
///
/// Only the contact route sits behind the auth layer; the exposure endpoints
/// are public by design and the allow-list is their sole access control.
pub fn router(state: AppState, auth: AuthLayer) -> Router {
    let authenticated = Router::new()
        .route("/api/contact-user", post(contact::contact_user))
        .layer(auth)
        .with_state(state.clone());

    Router::new()
        // Health
        .route("/health", get(health::health))
        // Config exposure
        .route("/api/config-list", get(expose::config_list))
        .route("/api/config-get/{conf_name}", get(expose::config_get))
        // Admin settings form
        .route(
            "/admin/expose-settings",
            get(admin::expose_options).put(admin::expose_submit),
        )
        .with_state(state)
        .merge(authenticated)
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
