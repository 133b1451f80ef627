//! Raw data export

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::services::reporting::ReportingService;
use crate::AppState;

#[derive(Deserialize)]
pub struct RecordsQuery {
    pub format: Option<String>, // "json" or "csv"
}

/// Export every loaded row
pub async fn export_records(
    State(state): State<AppState>,
    Query(query): Query<RecordsQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.dataset.clone());

    match query.format.as_deref() {
        Some("csv") => {
            let csv = service.export_to_csv()?;
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv"),
                    (
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=\"simulated_vineyard_data.csv\"",
                    ),
                ],
                csv,
            )
                .into_response())
        }
        None | Some("json") => Ok(Json(service.records().to_vec()).into_response()),
        Some(other) => Err(AppError::Validation(format!(
            "Unsupported format '{}', expected 'json' or 'csv'",
            other
        ))),
    }
}
