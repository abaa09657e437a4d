//! Route definitions for the dashboard server

use crate::{
    handlers::{self, ErrorResponse},
    state::AppState,
};
use axum::{
    Router,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;

/// Build the JSON API routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/filters", get(handlers::filters::get_filter_options))
        .route("/api/metrics", get(handlers::metrics::get_metrics))
        .route("/api/inventory", get(handlers::inventory::list_inventory))
        .route("/api/charts/heatmap", get(handlers::charts::heatmap_chart))
        .route("/api/charts/reorder", get(handlers::charts::reorder_chart))
        .route("/api/charts/usage", get(handlers::charts::usage_chart))
        .route(
            "/api/export/reorder.csv",
            get(handlers::export::export_reorder_csv),
        )
        .route("/api/cache/refresh", post(handlers::cache::refresh_cache))
        .layer(CompressionLayer::new())
}

/// Build the browser-facing page routes
pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(handlers::pages::dashboard))
}

/// Build health check routes
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
}

/// Build the complete router
pub fn build_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(page_routes())
        .merge(api_routes())
        .merge(health_routes())
        .fallback(not_found)
}

/// JSON 404 for unknown paths
async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Resource not found".to_string(),
            code: "NOT_FOUND".to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_not_found_shape() {
        let (status, Json(body)) = not_found().await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "NOT_FOUND");
    }
}
