//! Error handling for the vineyard dashboard
//!
//! Load failures are fatal at startup and carry a message telling the user
//! how to recover; request failures render as JSON.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use shared::CodecError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Dataset errors
    #[error("Data file '{}' not found. Run `vineyard-sim` first to generate it.", path.display())]
    MissingData { path: PathBuf },

    #[error("Data file '{}' is empty. Run `vineyard-sim` to regenerate it.", path.display())]
    EmptyDataset { path: PathBuf },

    #[error("Data file is missing required columns: {}. Run `vineyard-sim` to regenerate it.", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Malformed data at line {line}: {message}")]
    MalformedRow { line: u64, message: String },

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Request errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Translate a codec failure for the file at `path`
    pub fn from_codec(path: PathBuf, err: CodecError) -> Self {
        match err {
            CodecError::Empty => AppError::EmptyDataset { path },
            CodecError::MissingColumns(columns) => AppError::MissingColumns(columns),
            CodecError::MalformedRow { line, message } => AppError::MalformedRow { line, message },
            CodecError::Io(e) => AppError::Io(e),
            CodecError::Csv(e) => AppError::Internal(format!("CSV error: {}", e)),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::MissingData { .. } => (StatusCode::SERVICE_UNAVAILABLE, "MISSING_DATA"),
            AppError::EmptyDataset { .. } => (StatusCode::SERVICE_UNAVAILABLE, "EMPTY_DATASET"),
            AppError::MissingColumns(_) => (StatusCode::SERVICE_UNAVAILABLE, "MISSING_COLUMNS"),
            AppError::MalformedRow { .. } => (StatusCode::SERVICE_UNAVAILABLE, "MALFORMED_ROW"),
            AppError::InvalidDataset(_) => (StatusCode::SERVICE_UNAVAILABLE, "INVALID_DATASET"),
            AppError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let message = match &self {
            AppError::Io(_) | AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: ErrorDetail {
                    code: code.to_string(),
                    message,
                },
            }),
        )
            .into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_message_points_to_simulator() {
        let err = AppError::MissingData {
            path: PathBuf::from("simulated_vineyard_data.csv"),
        };
        let message = err.to_string();
        assert!(message.contains("simulated_vineyard_data.csv"));
        assert!(message.contains("vineyard-sim"));
    }

    #[test]
    fn test_startup_errors_render_as_one_line() {
        let errors = [
            AppError::MissingData {
                path: PathBuf::from("simulated_vineyard_data.csv"),
            },
            AppError::EmptyDataset {
                path: PathBuf::from("simulated_vineyard_data.csv"),
            },
            AppError::MissingColumns(vec!["date".into(), "hectares".into()]),
            AppError::InvalidDataset("humidity_percent = 500 on 2024-04-01".into()),
        ];
        for err in errors {
            assert!(!err.to_string().contains('\n'), "{}", err);
        }
    }

    #[test]
    fn test_codec_errors_translate() {
        let path = PathBuf::from("data.csv");
        assert!(matches!(
            AppError::from_codec(path.clone(), CodecError::Empty),
            AppError::EmptyDataset { .. }
        ));
        assert!(matches!(
            AppError::from_codec(path, CodecError::MalformedRow { line: 7, message: "bad".into() }),
            AppError::MalformedRow { line: 7, .. }
        ));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("Vintage 1999".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation("bad".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
