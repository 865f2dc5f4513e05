//! `concessionaria` server entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and initialize the schema.
//! - Serve HTTP until Ctrl-C.

mod config;

use anyhow::{anyhow, Context};
use clap::Parser;
use concessionaria_core::{default_log_level, init_logging, Storage};
use config::ServerConfig;
use log::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    let level = config
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    init_logging(&level, config.log_dir.as_deref()).map_err(|err| anyhow!(err))?;

    let storage = Storage::new(&config.database);
    storage
        .initialize()
        .with_context(|| format!("failed to initialize `{}`", config.database.display()))?;

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(
        "event=server_start module=cli status=ok version={} bind={}",
        concessionaria_core::core_version(),
        config.bind
    );

    concessionaria_web::serve(listener, storage, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=shutdown_signal module=cli status=error error={err}");
        std::future::pending::<()>().await;
    }
    info!("event=shutdown_signal module=cli status=ok");
}
