use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use loja_lib::rootuser::{initialize_root_user, RootUserConfig, ROOT_USER_EMAIL};
use loja_lib::util::connect_with_retry;

use loja_api::config::{AuthConfig, MiddlewareConfig};
use loja_api::constants::{
    DATABASE_MAX_RETRIES, DATABASE_URL, DEFAULT_PORT, ENV, LOCAL_ENV, LOJA_API_PORT, SERVICE,
    STORAGE, STORAGE_MEMORY,
};
use loja_api::shutdown::{serve_with_deadline, shutdown_signal};
use loja_api::{app_router, with_middleware, AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing subscriber
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let env = std::env::var(ENV)
        .map_err(|_| format!("{} environment variable must be set", ENV))?;

    let registry = tracing_subscriber::registry().with(filter);

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true);

    if env == LOCAL_ENV {
        let pretty_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .pretty();
        registry.with(json_layer).with(pretty_layer).init();
    } else {
        registry.with(json_layer).init();
    }

    tracing::info!(service = SERVICE, env = %env, "tracing initialized");

    let middleware_config = MiddlewareConfig::from_env();
    tracing::info!(
        rate_limit_per_minute = middleware_config.rate_limit_per_minute,
        rate_limit_burst = middleware_config.rate_limit_burst,
        request_timeout_secs = middleware_config.request_timeout.as_secs(),
        max_body_size = middleware_config.max_body_size,
        cors_origins = ?middleware_config.cors_allowed_origins,
        "middleware configuration loaded"
    );

    let auth_config = AuthConfig::from_env(&env)?;
    tracing::info!(token_ttl_secs = auth_config.token_ttl.as_secs(), "token configuration loaded");
    let tokens = auth_config.into_token_config();

    let in_memory = std::env::var(STORAGE)
        .map(|v| v.eq_ignore_ascii_case(STORAGE_MEMORY))
        .unwrap_or(false);

    let app_state = if in_memory {
        tracing::warn!("using in-memory storage, data is lost on restart");
        AppState::in_memory(tokens, env.clone())
    } else {
        let database_url = std::env::var(DATABASE_URL)
            .map_err(|_| format!("{} environment variable must be set", DATABASE_URL))?;
        let pool = connect_with_retry(&database_url, DATABASE_MAX_RETRIES).await?;
        AppState::mysql(pool, tokens, env.clone())
    };

    // Optional root user bootstrap
    if std::env::var(ROOT_USER_EMAIL).is_ok() {
        let root_config = RootUserConfig::from_env()?;
        let password = RootUserConfig::password_from_env()?;
        let root = initialize_root_user(app_state.users.as_ref(), &root_config, password).await?;
        tracing::info!(user_id = %root.id, "root user available");
    }

    let app = with_middleware(app_router(app_state), &middleware_config)?;

    let port: u16 = std::env::var(LOJA_API_PORT)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let addr = format!("0.0.0.0:{}", port);
    let public_url = format!("http://127.0.0.1:{}", port);

    let listener = TcpListener::bind(&addr).await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("{} is ready to accept requests at: {}", SERVICE, public_url);
    tracing::info!("API docs available at: {}/docs", public_url);

    // Serve with graceful shutdown, bounded by the drain timeout
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown_tx));

    serve_with_deadline(server, shutdown_rx, middleware_config.shutdown_timeout)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
