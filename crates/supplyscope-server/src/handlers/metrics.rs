//! Summary metrics endpoint

use super::{FilterParams, HandlerError, load_snapshot};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Summary metrics response
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    /// Rows in the filtered view
    pub total_records: usize,

    /// Distinct locations in the filtered view
    pub active_locations: usize,

    /// Rows at stockout risk
    pub critical_count: usize,

    /// Rows that should reorder soon
    pub warning_count: usize,

    /// Mean days of coverage, sentinel rows excluded
    pub avg_days_remaining: Option<f64>,

    /// True when the filtered view is empty
    pub no_data: bool,

    /// When the underlying snapshot was fetched
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

/// Compute scalar summary statistics over the filtered view
///
/// # Errors
///
/// * `BAD_REQUEST` - Unknown status filter value
/// * `SERVICE_UNAVAILABLE` - Warehouse cannot be reached
///
/// # Example
///
/// ```text
/// GET /api/metrics?locations=CLINIC_A,CLINIC_B&statuses=CRITICAL,WARNING
/// ```
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<MetricsResponse>, HandlerError> {
    let selection = params.into_selection()?;
    let snapshot = load_snapshot(&state).await?;

    let summary = snapshot.summarize(&selection);
    info!(
        "Metrics: {} rows, {} locations, {} critical, {} warnings",
        summary.total_records,
        summary.active_locations,
        summary.critical_count,
        summary.warning_count
    );

    Ok(Json(MetricsResponse {
        total_records: summary.total_records,
        active_locations: summary.active_locations,
        critical_count: summary.critical_count,
        warning_count: summary.warning_count,
        avg_days_remaining: summary.avg_days_remaining,
        no_data: summary.no_data,
        fetched_at: snapshot.fetched_at,
    }))
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_response_serialization() {
        let response = MetricsResponse {
            total_records: 12,
            active_locations: 3,
            critical_count: 2,
            warning_count: 4,
            avg_days_remaining: Some(11.25),
            no_data: false,
            fetched_at: chrono::Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"total_records\":12"));
        assert!(json.contains("\"critical_count\":2"));
        assert!(json.contains("11.25"));
        assert!(json.contains("\"no_data\":false"));
    }

    #[test]
    fn test_metrics_response_no_data() {
        let response = MetricsResponse {
            total_records: 0,
            active_locations: 0,
            critical_count: 0,
            warning_count: 0,
            avg_days_remaining: None,
            no_data: true,
            fetched_at: chrono::Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"avg_days_remaining\":null"));
        assert!(json.contains("\"no_data\":true"));
    }
}
