use axum::Router;
use tracing::{info, Level};

use chart_store::routes;
use chart_store::state::mock_state::MockState;

mod models;
mod utils;

use crate::utils::conf_helper::{get_cached_config, init_config_and_bind};

const CONFIG_PATH: &str = "mock_server.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    // === CONFIG + LISTENER ===
    let config_path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_PATH.to_string());
    let listener = init_config_and_bind(&config_path).await?;

    let config = get_cached_config()?;

    let state = MockState::seeded(&config.file_keys, config.sample_count, config.seed);

    info!(
        "Mock backend on {}:{} serving {:?}",
        config.connection.ip,
        config.connection.port,
        config.file_keys
    );

    let app = Router::new()
        .merge(routes::info_routes::health_routes(state.clone()))
        .merge(routes::mock_routes::mock_routes(state));

    axum::serve(listener, app).await?;
    Ok(())
}
