//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub rows: usize,
}

/// Plain liveness probe
pub async fn health_check() -> &'static str {
    "OK"
}

/// Health with dataset details
pub async fn health_details(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        rows: state.dataset.records().len(),
    })
}
