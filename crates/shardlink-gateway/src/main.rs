use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use shardlink_backend::{connect_redis_pool, in_memory_pool};
use shardlink_core::{Shortlinker, ShortlinkStore};
use shardlink_gateway::config::{BackendArg, Cli};
use shardlink_gateway::{telemetry, App, AppState};
use shardlink_generator::RandomGenerator;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();
    telemetry::init(config.log_format)?;

    info!(
        listen_addr = %config.listen_addr,
        backend = %config.backend,
        default_ttl_secs = config.default_ttl_secs,
        "starting shardlink gateway"
    );

    let generator = RandomGenerator::new(config.generator_settings())?;
    let shortlinker: Arc<dyn Shortlinker> = match config.backend {
        BackendArg::Redis => {
            let pool = connect_redis_pool(&config.shards, config.redis_settings())
                .await
                .context("failed to set up Redis shard pool")?;
            info!(shards = pool.len(), "redis shard pool ready");
            Arc::new(ShortlinkStore::new(pool, generator, config.store_settings()))
        }
        BackendArg::InMemory => {
            let pool = in_memory_pool(config.in_memory_shards)?;
            info!(shards = pool.len(), "in-memory shard pool ready");
            Arc::new(ShortlinkStore::new(pool, generator, config.store_settings()))
        }
    };

    let state = AppState::new(shortlinker, config.public_base_url());
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
