//! # Account Suite Deployer
//!
//! Deploys the suite onto an in-memory chain and prints the resulting
//! addresses as JSON.
//!
//! ## Startup Sequence
//!
//! 1. Initialise logging (`RUST_LOG`, default `info`)
//! 2. Load configuration (defaults, `LA_CONFIG`, `LA_*` overrides)
//! 3. Deploy and wire the suite
//! 4. Print the deployment summary

use anyhow::{Context, Result};
use deploy_runtime::{deploy_system, DeployConfig, InMemoryChain};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = DeployConfig::load().context("failed to load deployment configuration")?;
    info!(
        deployer = ?config.deployer,
        threshold = config.confirmation_threshold,
        fixtures = config.deploy_test_fixtures,
        "Deploying account suite"
    );

    let chain = InMemoryChain::new(config.deployer);
    let system = deploy_system(&config, &chain)
        .await
        .context("account suite deployment failed")?;

    let summary = serde_json::to_string_pretty(&system.summary())?;
    println!("{summary}");
    Ok(())
}
