use anyhow::Result;
use citypulse::config::CityPulseConfig;
use citypulse::dashboard::DashboardService;
use citypulse::web;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = CityPulseConfig::load()?;
    let service = Arc::new(DashboardService::new(&config)?);

    tracing::info!("CityPulse v{} starting", citypulse::VERSION);
    web::run(config.server.port, service).await;

    Ok(())
}
