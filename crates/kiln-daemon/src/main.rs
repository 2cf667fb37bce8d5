mod config;
mod server;

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use kiln_api::PipelineApiAdapter;
use kiln_core::Pipeline;
use kiln_exec::docker::DockerEngine;
use kiln_observe::{LoggerConfig, init_logger};
use kiln_prometheus::PrometheusMetrics;

use crate::config::DaemonConfig;

fn main() -> anyhow::Result<()> {
    // 1) .env, then logger while still single-threaded (local tz detection)
    let dotenv = dotenvy::dotenv();
    let logger = LoggerConfig::from_env()?;
    init_logger(&logger)?;
    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("ignoring environment file: {e}"),
    }

    // 2) configuration
    let cfg = DaemonConfig::from_env()?;
    info!(
        registry = %cfg.service.registry,
        image = %cfg.service.image_name,
        work_dir = %cfg.service.work_dir.display(),
        engine = %cfg.docker.program,
        "configuration loaded"
    );

    // 3) runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;
    runtime.block_on(serve(cfg))
}

async fn serve(cfg: DaemonConfig) -> anyhow::Result<()> {
    let metrics = Arc::new(PrometheusMetrics::new()?);
    let engine = Arc::new(DockerEngine::new(cfg.docker)?);
    let pipeline = Pipeline::new(Arc::new(cfg.service), engine).with_metrics(metrics.clone());
    let handler = Arc::new(PipelineApiAdapter::new(Arc::new(pipeline)));

    let app = server::router(handler, metrics);
    let listener = tokio::net::TcpListener::bind(cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!(addr = %cfg.listen_addr, "listening");

    let token = CancellationToken::new();
    tokio::spawn(server::watch_signals(token.clone()));

    let shutdown = token.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}
