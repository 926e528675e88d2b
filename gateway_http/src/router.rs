use crate::{handlers, state::AppState};
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Query routes nested under `mount_prefix`, plus `/health` and `/metrics`.
///
/// `mount_prefix` must pass `GatewayConfig::validate`; a prefix that shadows
/// `/health` or `/metrics` makes route registration panic.
pub fn build_router(state: AppState, mount_prefix: &str) -> Router {
    let api = Router::new()
        .route("/", get(handlers::all_metrics))
        .route("/services", get(handlers::list_services))
        .route("/:name", get(handlers::service_metrics))
        .route("/:name/:status", get(handlers::service_metrics_with_status));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::telemetry))
        .route(&format!("{}/", mount_prefix), get(handlers::all_metrics))
        .nest(mount_prefix, api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
