use anyhow::{anyhow, Context, Result};
use tokio::fs;
use std::sync::OnceLock;
use tracing::info;
use crate::models::server_model::MockServerConfig;
use tokio::net::TcpListener;

static CONFIG_CACHE: OnceLock<MockServerConfig> = OnceLock::new();

pub async fn init_config_and_bind(file_path: &str) -> Result<TcpListener> {
    let data = fs::read_to_string(file_path)
        .await
        .with_context(|| format!("File read Error: {file_path}"))?;

    let mut config: MockServerConfig = serde_json::from_str(&data)
        .context("JSON Parse Error")?;

    let bind_addr = format!(
        "{}:{}",
        config.connection.ip,
        config.connection.port
    );

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Bind failed: {bind_addr}"))?;

    // Port 0 means "pick one", record what we got
    let actual_port = listener
        .local_addr()
        .context("Addr error")?
        .port();

    config.connection.port = actual_port;

    CONFIG_CACHE
        .set(config)
        .map_err(|_| anyhow!("Config already initialized"))?;

    info!("Config initialized with port: {}", actual_port);

    Ok(listener)
}

pub fn get_cached_config() -> Result<&'static MockServerConfig> {
    CONFIG_CACHE.get().ok_or_else(|| anyhow!("Config not initialized"))
}
