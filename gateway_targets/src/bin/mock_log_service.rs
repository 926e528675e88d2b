use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use gateway_targets::common::{HealthStatus, LogGenerator};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, Level};

#[derive(Clone)]
struct AppState {
    start_time: Instant,
    generator: Arc<Mutex<LogGenerator>>,
    failure_rate: f64,
}

#[derive(Debug, Deserialize)]
struct MetricsQuery {
    count: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let addr = std::env::var("MOCK_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let service = std::env::var("MOCK_SERVICE_NAME").unwrap_or_else(|_| "mock".to_string());
    let failure_rate = std::env::var("MOCK_FAILURE_RATE")
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0);
    let seed = std::env::var("MOCK_SEED").ok().and_then(|v| v.parse().ok());

    let state = AppState {
        start_time: Instant::now(),
        generator: Arc::new(Mutex::new(LogGenerator::new(service.clone(), seed))),
        failure_rate,
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting mock log service '{}' on {}", service, addr);
    info!("Endpoints:");
    info!("  GET  /health              - Health check");
    info!("  GET  /api/metrics?count=N - Log entries");
    if failure_rate > 0.0 {
        warn!("Failing {:.0}% of metric requests", failure_rate * 100.0);
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::healthy(state.start_time.elapsed().as_secs()))
}

async fn metrics(
    State(state): State<AppState>,
    Query(query): Query<MetricsQuery>,
) -> impl IntoResponse {
    let mut generator = state.generator.lock().await;

    if generator.should_fail(state.failure_rate) {
        warn!("Simulating upstream failure");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({"error": "simulated outage"})),
        )
            .into_response();
    }

    let entries = generator.generate(query.count.unwrap_or(20).min(1000));
    Json(entries).into_response()
}
