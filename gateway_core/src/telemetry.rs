use std::time::Duration;

pub const UPSTREAM_REQUESTS_TOTAL: &str = "gateway_upstream_requests_total";
pub const UPSTREAM_REQUEST_DURATION_SECONDS: &str = "gateway_upstream_request_duration_seconds";

/// Records one upstream fetch. A no-op until a recorder is installed.
pub fn record_fetch(service: &str, outcome: &'static str, elapsed: Duration) {
    metrics::counter!(
        UPSTREAM_REQUESTS_TOTAL,
        "service" => service.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    metrics::histogram!(
        UPSTREAM_REQUEST_DURATION_SECONDS,
        "service" => service.to_string()
    )
    .record(elapsed.as_secs_f64());
}
