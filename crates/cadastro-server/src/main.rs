use std::sync::Arc;

use anyhow::{Context, Result};
use cadastro::{open_storage, HttpTransport};
use cadastro_server::{router, settings, AppState, SessionLimits};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = settings::load()?;

    let storage = open_storage(&config.storage).await?;
    let transport = Arc::new(HttpTransport::new(&config.endpoint)?);
    info!(
        storage = storage.name(),
        endpoint = %transport.endpoint(),
        "cadastro starting"
    );

    let state = AppState::new(storage, transport, config.validation.clone())
        .with_limits(SessionLimits::from_config(&config.server));
    let app = router(state, &config.server.route_prefix);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}/{}/", addr, config.server.route_prefix);

    axum::serve(listener, app).await?;
    Ok(())
}
