//! Server binary: load configuration, open the database, serve the app.

use anyhow::Context;
use tracing::info;

use gazette::config::ConfigManager;
use gazette::web::state::AppState;
use gazette::web::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gazette::logging::init_structured_logging();

    let manager = ConfigManager::load().context("loading configuration")?;
    let config = manager.config().clone();
    let bind_address = config.server.bind_address.clone();

    let state = AppState::new(config)
        .await
        .context("initializing application state")?;

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("binding {bind_address}"))?;

    info!(address = %bind_address, environment = manager.environment(), "gazette listening");

    axum::serve(listener, router).await.context("server error")?;

    Ok(())
}
