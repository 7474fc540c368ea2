use axum_helpers::server::{DEFAULT_SHUTDOWN_TIMEOUT, create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    // Connect to MongoDB with retry
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    let db = mongo_client.database(config.mongodb.database());

    info!(
        database = config.mongodb.database(),
        collection = config.mongodb.collection(),
        "Connected to MongoDB"
    );

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    // Users, health and readiness routes, wrapped with docs, fallbacks,
    // tracing and the read/write timeouts
    let app = create_router::<openapi::ApiDoc>(api::routes(&state), &state.config.server);

    info!(
        "Starting Users API on {} ({:?} shutdown timeout)",
        state.config.server.address(),
        DEFAULT_SHUTDOWN_TIMEOUT
    );

    let AppState {
        config,
        mongo_client,
        ..
    } = state;

    create_production_app(app, &config.server, DEFAULT_SHUTDOWN_TIMEOUT, async move {
        info!("Shutting down: closing MongoDB connections");
        mongo_client.shutdown().await;
        info!("MongoDB connection closed successfully");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
