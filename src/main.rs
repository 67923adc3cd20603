use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use vaultpress::Config;

/// Log filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;
    tracing::debug!("Configuration: {:?}", config);

    vaultpress::serve(config).await
}
