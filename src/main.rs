use anyhow::{Context, Result};
use pastport::AppConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pastport=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    config.validate().context("Invalid configuration")?;

    info!("Starting PastPort against {}", config.api_base_url);

    pastport::ui::run(config).map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}
