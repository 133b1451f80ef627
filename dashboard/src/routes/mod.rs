//! Route definitions for the vineyard dashboard

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_details))
        .route("/overview", get(handlers::get_overview))
        .route("/records", get(handlers::export_records))
        // Vintage selector and detail
        .route("/vintages", get(handlers::list_vintages))
        .route("/vintages/:year", get(handlers::get_vintage))
}
