use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use promoter_tracker_backend::backend;

// Defaults, overridable via environment
const DEFAULT_DATABASE_URL: &str = "sqlite:promoter_tracker.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let db_url = std::env::var("PROMOTER_TRACKER_DB")
        .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let addr: SocketAddr = std::env::var("PROMOTER_TRACKER_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;

    let app_state = backend::initialize_backend(&db_url).await?;
    let app = backend::create_router(app_state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
