use crate::{error::ApiError, state::AppState};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use gateway_core::{AggregateReport, MetricEntry, ServiceTarget};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub services: usize,
}

pub async fn list_services(State(state): State<AppState>) -> Json<Vec<ServiceTarget>> {
    Json(state.dispatcher.services().to_vec())
}

pub async fn all_metrics(
    State(state): State<AppState>,
) -> Result<Json<Vec<AggregateReport>>, ApiError> {
    Ok(Json(state.dispatcher.all_metrics().await?))
}

pub async fn service_metrics(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<MetricEntry>>, ApiError> {
    Ok(Json(state.dispatcher.service_metrics(&name, None).await?))
}

pub async fn service_metrics_with_status(
    State(state): State<AppState>,
    Path((name, status)): Path<(String, String)>,
) -> Result<Json<Vec<MetricEntry>>, ApiError> {
    Ok(Json(
        state
            .dispatcher
            .service_metrics(&name, Some(&status))
            .await?,
    ))
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        services: state.dispatcher.services().len(),
    })
}

pub async fn telemetry(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let handle = state
        .telemetry
        .as_ref()
        .ok_or_else(|| ApiError::new(StatusCode::NOT_FOUND, "Telemetry disabled"))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}
