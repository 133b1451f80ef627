//! Dashboard page

use axum::response::Html;

const DASHBOARD_HTML: &str = include_str!("../../assets/dashboard.html");

/// Serve the single-page dashboard
pub async fn dashboard_page() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}
