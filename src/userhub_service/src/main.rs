use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use reqwest::Client as HttpClient;
use tokio::net::TcpListener;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use userhub_adapters::{
    AbstractEmailVerifier, Argon2CredentialHasher, JwtConfig, JwtTokenService,
    PostgresUserStore, PostmarkEmailClient, Settings, config::AllowedOrigins,
};
use userhub_axum::{AppState, AuthConfig};
use userhub_core::{EmailAddress, EmailVerifier};
use userhub_service::{UserHubService, configure_postgresql};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    let settings = Settings::load()?;

    // Setup database connection pool and run migrations
    let pg_pool = configure_postgresql(&settings).await;
    let user_store = PostgresUserStore::new(pg_pool);

    // Shared HTTP client for the outbound mail and deliverability calls
    let http_client = HttpClient::builder()
        .timeout(Duration::from_millis(settings.email_client.timeout_millis))
        .build()?;

    let sender = EmailAddress::parse(&settings.email_client.sender)?;
    let mailer = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        sender,
        settings.email_client.auth_token.clone(),
        settings.email_client.front_url.clone(),
        http_client.clone(),
    );

    let email_verifier: Option<Arc<dyn EmailVerifier>> =
        if settings.email_verifier.enabled {
            Some(Arc::new(AbstractEmailVerifier::new(
                settings.email_verifier.base_url.clone(),
                settings.email_verifier.api_key.clone(),
                http_client,
            )))
        } else {
            None
        };

    let tokens = JwtTokenService::new(JwtConfig {
        secret: settings.auth.jwt_secret.clone(),
        session_ttl_seconds: settings.auth.session_ttl_seconds,
        registration_ttl_seconds: settings.auth.registration_ttl_seconds,
        reset_ttl_seconds: settings.auth.reset_ttl_seconds,
    });

    let state = AppState {
        user_store: Arc::new(user_store),
        hasher: Arc::new(Argon2CredentialHasher::new()),
        tokens: Arc::new(tokens),
        mailer: Arc::new(mailer),
        email_verifier,
        auth: AuthConfig {
            cookie_name: settings.auth.cookie_name.clone(),
            transport: settings.auth.token_transport,
        },
    };

    let allowed_origins = settings
        .application
        .allowed_origins
        .as_deref()
        .map(AllowedOrigins::parse);

    let listener = TcpListener::bind(&settings.application.address).await?;
    tracing::info!("Starting userhub service...");

    UserHubService::new(state)
        .run(listener, allowed_origins)
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
