//! # eta-server
//!
//! Serves the delivery model at `DELIVERY_MODEL_PATH` on `HOST:PORT`.

use server::ServerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,tower_http=info".into()),
        )
        .init();

    tracing::info!(model = %config.model_path.display(), "loading model artifact");
    server::run(&config).await?;
    Ok(())
}
