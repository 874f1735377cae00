/// Server setup and initialization
///
/// Wires together storage and HTTP routes, and owns logging setup for the
/// binary.

use crate::{
    api::{create_routes, AppState},
    config::Config,
    store::{database, GradebookStore},
};
use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber
///
/// Filtered by `RUST_LOG` (default `info`) and written to stderr so shell
/// output on stdout stays readable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}

/// Open the configured database and wrap it in a store handle
pub async fn open_store(config: &Config) -> Result<GradebookStore> {
    let pool = database::connect(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open gradebook database: {}", e))?;

    Ok(GradebookStore::new(pool, config.database.statement_timeout()))
}

/// Build the router over an existing store
pub fn create_router(store: GradebookStore) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .merge(create_routes())
        .with_state(AppState { store })
}

/// Create the main Axum application with all routes
pub async fn create_app(config: Config) -> Result<Router> {
    tracing::info!("🏗️ Initializing gradebook storage");
    let store = open_store(&config).await?;

    tracing::info!("📡 Creating HTTP router with all endpoints");
    let app = create_router(store);

    tracing::info!("✅ Application initialized successfully");

    Ok(app)
}

/// Start the HTTP server with the given configuration
pub async fn start_server(config: Config) -> Result<()> {
    tracing::info!("Starting gradebook server...");

    let app = create_app(config.clone()).await?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "ok"
}
