use std::sync::Arc;

use trove_api::{router, AppState, InMemoryAssetImages};
use trove_core::Config;
use trove_storage::create_storage;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load .env if present, then configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    trove_api::telemetry::init_tracing(config.is_production());

    // One storage provider for the process lifetime, injected everywhere
    let storage = create_storage(&config).await?;
    let images = Arc::new(InMemoryAssetImages::new());

    tracing::info!(
        backend = %storage.backend_type(),
        port = config.server_port,
        "Starting trove-api"
    );

    let state = Arc::new(AppState::new(config.clone(), storage, images));
    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
