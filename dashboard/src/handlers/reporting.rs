//! Reporting handlers for the overview and vintage views

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::reporting::{Overview, ReportingService, VintageDetail, VintageOption};
use crate::AppState;

/// Header figures, yearly summaries and correlations
pub async fn get_overview(State(state): State<AppState>) -> Json<Overview> {
    let service = ReportingService::new(state.dataset.clone());
    Json(service.overview())
}

/// Vintages offered in the selector
pub async fn list_vintages(State(state): State<AppState>) -> Json<Vec<VintageOption>> {
    let service = ReportingService::new(state.dataset.clone());
    Json(service.available_vintages())
}

/// Daily detail of one vintage
pub async fn get_vintage(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> AppResult<Json<VintageDetail>> {
    let service = ReportingService::new(state.dataset.clone());
    let detail = service.vintage_detail(year)?;
    Ok(Json(detail))
}
