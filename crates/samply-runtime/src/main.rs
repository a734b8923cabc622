//! # Samply Runtime Binary

use anyhow::{Context, Result};
use samply_runtime::{load_config, open_market, Sweeper};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config();

    // Initialize logging
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(
        "[samply] Starting samply-runtime v{} (data: {})",
        samply_market::VERSION,
        config.data_path.display()
    );

    let market = open_market(&config)
        .with_context(|| format!("failed to open {}", config.data_path.display()))?;
    let sweeper = Sweeper::spawn(market, config.sweep_interval);

    info!("[samply] Ready. Press Ctrl-C to stop.");
    tokio::signal::ctrl_c().await?;

    info!("[samply] Initiating graceful shutdown...");
    sweeper.stop().await;
    info!("[samply] Shutdown complete");
    Ok(())
}
