use gateway_core::QueryDispatcher;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<QueryDispatcher>,
    pub telemetry: Option<PrometheusHandle>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(dispatcher: Arc<QueryDispatcher>) -> Self {
        Self {
            dispatcher,
            telemetry: None,
            start_time: Instant::now(),
        }
    }

    pub fn with_telemetry(mut self, handle: PrometheusHandle) -> Self {
        self.telemetry = Some(handle);
        self
    }
}
