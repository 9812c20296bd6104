mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use vantage_api::{DiscoveryApiAdapter, HttpApi};
use vantage_core::{DefaultProbeSet, MemoryStore};
use vantage_discover::Discovery;
use vantage_observe::logger_init;

use crate::config::DaemonConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = DaemonConfig::from_env()?;

    // 1) Logger
    logger_init(&cfg.logger)?;
    info!(format = %cfg.logger.format, filter = %cfg.logger.directives(), "logger initialized");

    // 2) Store with the probe agents known to this deployment
    let store = Arc::new(MemoryStore::new());
    for name in &cfg.probe_names {
        store.register_probe(name.as_str(), cfg.probe_scope);
    }
    info!(probes = cfg.probe_names.len(), scope = %cfg.probe_scope, "probe agents registered");

    // 3) Default probe set, resolved once and shared by every request
    let names: Vec<&str> = cfg.probe_names.iter().map(String::as_str).collect();
    let defaults = DefaultProbeSet::resolve(store.as_ref(), &names, cfg.probe_scope)
        .await
        .context("resolving default probes")?;
    info!(resolved = defaults.ids().len(), "default probe set ready");

    // 4) Discovery engine
    let discovery = Arc::new(Discovery::new(&cfg.discover, defaults)?);
    info!("discovery engine ready");

    // 5) HTTP API
    let adapter = Arc::new(DiscoveryApiAdapter::new(discovery, store));
    let app = HttpApi::new(adapter).router();

    let listener = tokio::net::TcpListener::bind(cfg.listen)
        .await
        .with_context(|| format!("binding {}", cfg.listen))?;
    info!(addr = %cfg.listen, "http api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
    }
}
