use anyhow::Context;
use larder::config::ServerConfig;
use larder::gateway::SpoonacularClient;
use larder::logging;
use larder::server::{AppState, router};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_stdout();

    let config = ServerConfig::from_env()?;
    if !config.has_api_key() {
        warn!("SPOONACULAR_API_KEY not set; recipe endpoints will answer 500");
    }

    let address = config.socket_addr()?;
    let app = router(AppState::new(SpoonacularClient::new(config.provider)));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(%address, "server running");

    axum::serve(listener, app).await?;

    Ok(())
}
