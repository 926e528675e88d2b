use super::load_config;
use anyhow::Result;
use gateway_core::{HttpFetcher, QueryDispatcher};
use gateway_http::{build_router, AppState};
use gateway_metrics::install_prometheus;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub async fn execute(
    config: Option<PathBuf>,
    listen: Option<SocketAddr>,
    timeout: Option<Duration>,
) -> Result<()> {
    let mut config = load_config(config).await?;

    if let Some(listen) = listen {
        config.listen = listen;
    }
    if let Some(timeout) = timeout {
        info!("Overriding request timeout: {:?}", timeout);
        config.request_timeout = Some(timeout);
    }
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    if config.services.is_empty() {
        warn!("No services configured; aggregate responses will be empty");
    }

    let registry = Arc::new(config.registry()?);
    let fetcher = Arc::new(HttpFetcher::with_timeout(config.request_timeout)?);
    let dispatcher = Arc::new(QueryDispatcher::new(registry, fetcher));

    let state = AppState::new(dispatcher).with_telemetry(install_prometheus()?);
    let app = build_router(state, &config.mount_prefix);

    let prefix = &config.mount_prefix;
    info!("Endpoints:");
    info!("  GET  {}                 - Aggregated stats for all services", prefix);
    info!("  GET  {}/services        - Configured services", prefix);
    info!("  GET  {}/:name           - Raw entries of one service", prefix);
    info!("  GET  {}/:name/:status   - Entries filtered by level", prefix);
    info!("  GET  /health            - Health check");
    info!("  GET  /metrics           - Gateway telemetry");

    gateway_http::serve(app, config.listen).await
}
