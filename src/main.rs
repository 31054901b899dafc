use anyhow::Result;
use clap::Parser;
use tracing::info;

use fairpot::{BaseConfig, Fairpot};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize telemetry
    fairpot::telemetry::init();
    info!("Starting fairpot");

    // Parse configuration from CLI arguments
    let config = BaseConfig::parse();
    info!(
        "Configuration: entrance_fee={}, round_interval_secs={}",
        config.entrance_fee, config.round_interval_secs
    );

    // Initialize and run the app
    let app = Fairpot::initialize(config)?;
    app.run().await?;

    info!("Fairpot shutdown complete");
    Ok(())
}
