use anyhow::Result;
use gateway_core::telemetry::{UPSTREAM_REQUESTS_TOTAL, UPSTREAM_REQUEST_DURATION_SECONDS};
use metrics::Unit;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tracing::info;

const DURATION_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

/// Installs the process-wide Prometheus recorder. Call at most once.
pub fn install_prometheus() -> Result<PrometheusHandle> {
    let handle = builder()?.install_recorder()?;

    describe_metrics();
    info!("Prometheus recorder installed");

    Ok(handle)
}

fn builder() -> Result<PrometheusBuilder> {
    Ok(PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full(UPSTREAM_REQUEST_DURATION_SECONDS.to_string()),
        DURATION_BUCKETS,
    )?)
}

fn describe_metrics() {
    metrics::describe_counter!(
        UPSTREAM_REQUESTS_TOTAL,
        Unit::Count,
        "Upstream metric fetches by service and outcome"
    );
    metrics::describe_histogram!(
        UPSTREAM_REQUEST_DURATION_SECONDS,
        Unit::Seconds,
        "Upstream metric fetch latency"
    );
}
