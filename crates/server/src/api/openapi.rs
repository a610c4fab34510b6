use utoipa::OpenApi;

use foyer_contact::ContactSubmission;
use foyer_expose::FormOption;

use super::schemas::{
    ContactResponse, ErrorResponse, HealthResponse, SettingsResponse, SubmitSettingsRequest,
};

/// OpenAPI document for the Foyer HTTP surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Foyer",
        description = "Public REST facade for a headless content platform: config exposure and contact relay."
    ),
    paths(
        super::health::health,
        super::expose::config_list,
        super::expose::config_get,
        super::contact::contact_user,
        super::admin::expose_options,
        super::admin::expose_submit,
    ),
    components(schemas(
        ContactResponse,
        ContactSubmission,
        ErrorResponse,
        FormOption,
        HealthResponse,
        SettingsResponse,
        SubmitSettingsRequest,
    )),
    tags(
        (name = "Exposure", description = "Allow-list gated config reads"),
        (name = "Contact", description = "Personal contact form"),
        (name = "Admin", description = "Exposure allow-list management"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;
