use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use foyer_contact::ContactService;
use foyer_core::{UserAccount, UserId};
use foyer_expose::{ExposeService, SettingsForm};
use foyer_mail::transport::MailTransport;
use foyer_mail::{LogMailer, SmtpMailer};
use foyer_server::api::{AppState, router};
use foyer_server::auth::AuthLayer;
use foyer_server::auth::middleware::{TokenPrincipal, TokenTable};
use foyer_server::config::FoyerConfig;
use foyer_server::error::ServerError;
use foyer_store::config::ConfigStore;
use foyer_store::messages::MessageStore;
use foyer_store::prefs::PreferenceStore;
use foyer_store::users::UserStore;
use foyer_store_memory::{
    MemoryConfigStore, MemoryMessageStore, MemoryPreferenceStore, MemoryUserStore,
};

/// Foyer HTTP server.
#[derive(Parser, Debug)]
#[command(name = "foyer-server", about = "Standalone HTTP server for Foyer")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "foyer.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber from RUST_LOG or default to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let config: FoyerConfig = if Path::new(&cli.config).exists() {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        info!(path = %cli.config, "config file not found, using defaults");
        FoyerConfig::default()
    };

    // Build and seed the in-memory stores.
    let configs = Arc::new(MemoryConfigStore::new());
    if let Some(ref dir) = config.store.config_dir {
        let count = seed_configs(&configs, Path::new(dir))?;
        info!(count, directory = %dir, "seeded config store");
    }

    let users = Arc::new(MemoryUserStore::new());
    let prefs = Arc::new(MemoryPreferenceStore::new());
    for seed in &config.users {
        users.add(UserAccount::new(
            seed.id.as_str(),
            seed.name.as_str(),
            seed.email.as_str(),
        ));
        // Only an explicit opt-out is recorded; absence means enabled.
        if seed.contact_enabled == Some(false) {
            prefs.set(
                &UserId::from(seed.id.as_str()),
                "contact",
                "enabled",
                serde_json::Value::Bool(false),
            );
        }
    }
    if !config.users.is_empty() {
        info!(count = config.users.len(), "seeded user directory");
    }

    let messages = Arc::new(MemoryMessageStore::new());

    // Pick the mail transport.
    let mailer: Arc<dyn MailTransport> = if config.mail.enabled {
        let smtp = config.mail.smtp.ok_or_else(|| {
            ServerError::Config("mail is enabled but [mail.smtp] is missing".to_owned())
        })?;
        info!(host = %smtp.smtp_host, "SMTP mail delivery enabled");
        Arc::new(SmtpMailer::new(
            smtp,
            Arc::clone(&users) as Arc<dyn UserStore>,
        )?)
    } else {
        warn!("mail delivery disabled, using log-only transport");
        Arc::new(LogMailer::new())
    };

    // Wire the services.
    let config_store: Arc<dyn ConfigStore> = configs;
    let state = AppState {
        expose: ExposeService::new(Arc::clone(&config_store)),
        form: SettingsForm::new(Arc::clone(&config_store)),
        contact: ContactService::new(
            Arc::clone(&users) as Arc<dyn UserStore>,
            Arc::clone(&prefs) as Arc<dyn PreferenceStore>,
            Arc::clone(&messages) as Arc<dyn MessageStore>,
            mailer,
        ),
    };

    // Build the auth layer from the configured token table.
    let auth = if config.auth.tokens.is_empty() {
        warn!("no auth tokens configured, contact endpoint accepts anonymous callers");
        AuthLayer::new(None)
    } else {
        let table: TokenTable = config
            .auth
            .tokens
            .into_iter()
            .map(|entry| {
                (
                    entry.token,
                    TokenPrincipal {
                        name: entry.name,
                        email: entry.email,
                    },
                )
            })
            .collect::<HashMap<_, _>>();
        info!(count = table.len(), "auth token table loaded");
        AuthLayer::new(Some(Arc::new(table)))
    };

    let app = router(state, auth);

    // Resolve the bind address (CLI overrides take precedence).
    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "foyer-server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("foyer-server shut down");
    Ok(())
}

/// Load every `*.json` document in `dir` into the config store; the file
/// stem becomes the config name. Returns the number of documents loaded.
fn seed_configs(store: &MemoryConfigStore, dir: &Path) -> Result<usize, ServerError> {
    if !dir.is_dir() {
        return Err(ServerError::Config(format!(
            "config_dir is not a directory: {}",
            dir.display()
        )));
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let contents = std::fs::read_to_string(&path)?;
        let data: serde_json::Value = serde_json::from_str(&contents).map_err(|e| {
            ServerError::Config(format!("invalid JSON in {}: {e}", path.display()))
        })?;
        store.insert(stem, data);
        count += 1;
    }

    Ok(count)
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
