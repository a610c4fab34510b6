use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tower::ServiceExt;

use foyer_contact::ContactService;
use foyer_core::{Caller, Message, UserAccount};
use foyer_expose::{ExposeService, SettingsForm};
use foyer_mail::error::MailError;
use foyer_mail::transport::MailTransport;
use foyer_server::api::{AppState, router};
use foyer_server::auth::AuthLayer;
use foyer_server::auth::middleware::{TokenPrincipal, TokenTable};
use foyer_store::config::ConfigStore;
use foyer_store::messages::MessageStore;
use foyer_store::prefs::PreferenceStore;
use foyer_store::users::UserStore;
use foyer_store_memory::{
    MemoryConfigStore, MemoryMessageStore, MemoryPreferenceStore, MemoryUserStore,
};

// -- Mock mailer ----------------------------------------------------------

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<Message>>,
    fail: bool,
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, message: &Message, _sender: &Caller) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Transport("connection refused".to_owned()));
        }
        self.sent.lock().push(message.clone());
        Ok(())
    }
}

// -- Fixture --------------------------------------------------------------

struct TestApp {
    app: axum::Router,
    configs: Arc<MemoryConfigStore>,
    prefs: Arc<MemoryPreferenceStore>,
    messages: Arc<MemoryMessageStore>,
    mailer: Arc<RecordingMailer>,
}

fn build_app(fail_mail: bool, with_tokens: bool) -> TestApp {
    let configs = Arc::new(MemoryConfigStore::new());
    configs.insert(
        "system.site",
        json!({"name": "My Site", "mail": "admin@example.com"}),
    );
    configs.insert("user.settings", json!({"register": "visitors"}));

    let users = Arc::new(MemoryUserStore::new());
    users.add(UserAccount::new("7", "Grace", "grace@example.com"));

    let prefs = Arc::new(MemoryPreferenceStore::new());
    let messages = Arc::new(MemoryMessageStore::new());
    let mailer = Arc::new(RecordingMailer {
        sent: Mutex::new(Vec::new()),
        fail: fail_mail,
    });

    let state = AppState {
        expose: ExposeService::new(Arc::clone(&configs) as Arc<dyn ConfigStore>),
        form: SettingsForm::new(Arc::clone(&configs) as Arc<dyn ConfigStore>),
        contact: ContactService::new(
            Arc::clone(&users) as Arc<dyn UserStore>,
            Arc::clone(&prefs) as Arc<dyn PreferenceStore>,
            Arc::clone(&messages) as Arc<dyn MessageStore>,
            Arc::clone(&mailer) as Arc<dyn MailTransport>,
        ),
    };

    let auth = if with_tokens {
        let mut table = TokenTable::new();
        table.insert(
            "t-ada".to_owned(),
            TokenPrincipal {
                name: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
            },
        );
        AuthLayer::new(Some(Arc::new(table)))
    } else {
        AuthLayer::new(None)
    };

    TestApp {
        app: router(state, auth),
        configs,
        prefs,
        messages,
        mailer,
    }
}

async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value, Option<String>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let cache_tag = response
        .headers()
        .get("cache-tag")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value, cache_tag)
}

async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: &Value,
    bearer: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn contact_body() -> Value {
    json!({
        "recipient": "7",
        "subject": "Hello",
        "message": "A question about your article."
    })
}

async fn select(app: &axum::Router, names: &[&str]) {
    let (status, _) = send_json(
        app,
        "PUT",
        "/admin/expose-settings",
        &json!({ "selected": names }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

// -- Health ---------------------------------------------------------------

#[tokio::test]
async fn health_returns_200() {
    let t = build_app(false, true);
    let (status, body, _) = get(&t.app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// -- Config exposure ------------------------------------------------------

#[tokio::test]
async fn config_list_with_empty_allow_list_is_400() {
    let t = build_app(false, true);
    let (status, body, _) = get(&t.app, "/api/config-list").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not allowed any"));
}

#[tokio::test]
async fn config_list_returns_persisted_order_with_cache_tag() {
    let t = build_app(false, true);
    select(&t.app, &["user.settings", "system.site"]).await;

    let (status, body, cache_tag) = get(&t.app, "/api/config-list").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["user.settings", "system.site"]));
    assert_eq!(cache_tag.as_deref(), Some("config:config_expose.settings"));
}

#[tokio::test]
async fn config_get_allowed_returns_wrapped_raw_data() {
    let t = build_app(false, true);
    select(&t.app, &["system.site"]).await;

    let (status, body, cache_tag) = get(&t.app, "/api/config-get/system.site").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"system.site": {"name": "My Site", "mail": "admin@example.com"}})
    );
    assert_eq!(cache_tag.as_deref(), Some("config:config_expose.settings"));
}

#[tokio::test]
async fn config_get_unlisted_is_400_naming_the_config() {
    let t = build_app(false, true);
    select(&t.app, &["system.site"]).await;

    let (status, body, _) = get(&t.app, "/api/config-get/other.module").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("other.module"));
}

#[tokio::test]
async fn config_get_with_no_allow_list_is_400() {
    let t = build_app(false, true);
    let (status, _, _) = get(&t.app, "/api/config-get/system.site").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// -- Admin form -----------------------------------------------------------

#[tokio::test]
async fn admin_options_list_all_names_with_selection_state() {
    let t = build_app(false, true);
    select(&t.app, &["system.site"]).await;

    let (status, body, _) = get(&t.app, "/admin/expose-settings").await;
    assert_eq!(status, StatusCode::OK);

    let options = body.as_array().unwrap();
    // The settings record itself now lives in the store as well.
    assert!(options.len() >= 2);
    let site = options
        .iter()
        .find(|o| o["name"] == "system.site")
        .unwrap();
    let user = options
        .iter()
        .find(|o| o["name"] == "user.settings")
        .unwrap();
    assert_eq!(site["selected"], json!(true));
    assert_eq!(user["selected"], json!(false));
}

#[tokio::test]
async fn admin_submit_fully_replaces_prior_selection() {
    let t = build_app(false, true);
    select(&t.app, &["system.site", "user.settings"]).await;
    select(&t.app, &["user.settings"]).await;

    let (status, body, _) = get(&t.app, "/api/config-list").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["user.settings"]));
}

#[tokio::test]
async fn admin_submit_is_idempotent() {
    let t = build_app(false, true);
    let (status_a, body_a) = send_json(
        &t.app,
        "PUT",
        "/admin/expose-settings",
        &json!({"selected": ["system.site"]}),
        None,
    )
    .await;
    let (status_b, body_b) = send_json(
        &t.app,
        "PUT",
        "/admin/expose-settings",
        &json!({"selected": ["system.site"]}),
        None,
    )
    .await;

    assert_eq!(status_a, StatusCode::OK);
    assert_eq!(status_b, StatusCode::OK);
    assert_eq!(body_a, body_b);
    assert_eq!(body_b["selected_configs"], json!(["system.site"]));
}

#[tokio::test]
async fn admin_submit_drops_empty_entries() {
    let t = build_app(false, true);
    let (_, body) = send_json(
        &t.app,
        "PUT",
        "/admin/expose-settings",
        &json!({"selected": ["", "system.site", ""]}),
        None,
    )
    .await;
    assert_eq!(body["selected_configs"], json!(["system.site"]));
}

// -- Contact dispatch -----------------------------------------------------

#[tokio::test]
async fn contact_without_credentials_is_401() {
    let t = build_app(false, true);
    let (status, _) = send_json(&t.app, "POST", "/api/contact-user", &contact_body(), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(t.messages.is_empty());
}

#[tokio::test]
async fn contact_with_unknown_token_is_401() {
    let t = build_app(false, true);
    let (status, _) = send_json(
        &t.app,
        "POST",
        "/api/contact-user",
        &contact_body(),
        Some("t-wrong"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn contact_with_missing_fields_is_422_and_persists_nothing() {
    let t = build_app(false, true);
    let (status, body) = send_json(
        &t.app,
        "POST",
        "/api/contact-user",
        &json!({"recipient": "7", "subject": "Hello"}),
        Some("t-ada"),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "recipient, subject or message is missing");
    assert!(t.messages.is_empty());
}

#[tokio::test]
async fn contact_with_unknown_recipient_is_422() {
    let t = build_app(false, true);
    let mut body = contact_body();
    body["recipient"] = json!("404");

    let (status, response) =
        send_json(&t.app, "POST", "/api/contact-user", &body, Some("t-ada")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["error"], "recipient does not exist");
    assert!(t.messages.is_empty());
}

#[tokio::test]
async fn contact_with_disabled_recipient_is_422_and_sends_nothing() {
    let t = build_app(false, true);
    t.prefs.set(
        &foyer_core::UserId::from("7"),
        "contact",
        "enabled",
        json!(false),
    );

    let (status, body) = send_json(
        &t.app,
        "POST",
        "/api/contact-user",
        &contact_body(),
        Some("t-ada"),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "recipient has disabled contact form");
    assert!(t.messages.is_empty());
    assert!(t.mailer.sent.lock().is_empty());
}

#[tokio::test]
async fn contact_success_returns_fixed_payload_and_persists_caller_identity() {
    let t = build_app(false, true);
    let (status, body) = send_json(
        &t.app,
        "POST",
        "/api/contact-user",
        &contact_body(),
        Some("t-ada"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Your message has been sent."}));

    let persisted = t.messages.messages();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].sender_name, "Ada");
    assert_eq!(persisted[0].sender_email, "ada@example.com");
    assert_eq!(persisted[0].recipient.as_str(), "7");
    assert_eq!(t.mailer.sent.lock().len(), 1);
}

#[tokio::test]
async fn contact_copy_flag_follows_field_presence() {
    let t = build_app(false, true);
    let mut body = contact_body();
    body["copy"] = json!(false);

    let (status, _) = send_json(&t.app, "POST", "/api/contact-user", &body, Some("t-ada")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(t.messages.messages()[0].copy);
}

#[tokio::test]
async fn contact_mail_failure_is_500_but_message_is_persisted() {
    let t = build_app(true, true);
    let (status, body) = send_json(
        &t.app,
        "POST",
        "/api/contact-user",
        &contact_body(),
        Some("t-ada"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "failed to send email, try again later");
    assert_eq!(t.messages.len(), 1);
}

#[tokio::test]
async fn contact_without_token_table_runs_as_anonymous() {
    let t = build_app(false, false);
    let (status, _) = send_json(&t.app, "POST", "/api/contact-user", &contact_body(), None).await;

    assert_eq!(status, StatusCode::OK);
    let persisted = t.messages.messages();
    assert_eq!(persisted[0].sender_name, "anonymous");
}

// -- Exposure end to end --------------------------------------------------

#[tokio::test]
async fn exposing_a_new_config_takes_effect_immediately() {
    let t = build_app(false, true);
    t.configs.insert("views.settings", json!({"display": "grid"}));

    select(&t.app, &["views.settings"]).await;
    let (status, body, _) = get(&t.app, "/api/config-get/views.settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"views.settings": {"display": "grid"}}));
}
