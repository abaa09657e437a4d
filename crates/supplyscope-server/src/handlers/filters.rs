//! Filter option endpoint

use super::{HandlerError, load_snapshot};
use crate::state::AppState;
use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;
use supplyscope_core::StockStatus;
use tracing::info;

/// Filter options response
#[derive(Debug, Serialize)]
pub struct FilterOptionsResponse {
    /// Distinct location ids, sorted
    pub locations: Vec<String>,

    /// Statuses present in the snapshot
    pub statuses: Vec<StatusOption>,

    /// When the underlying snapshot was fetched
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

/// One selectable status choice
#[derive(Debug, Serialize)]
pub struct StatusOption {
    /// Short code used in query parameters
    pub code: &'static str,

    /// Display label as the warehouse emits it
    pub label: &'static str,
}

impl From<StockStatus> for StatusOption {
    fn from(status: StockStatus) -> Self {
        Self {
            code: status.short_code(),
            label: status.label(),
        }
    }
}

/// Derive the selectable filter choices from the snapshot columns
///
/// # Errors
///
/// * `SERVICE_UNAVAILABLE` - Warehouse cannot be reached
pub async fn get_filter_options(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FilterOptionsResponse>, HandlerError> {
    let snapshot = load_snapshot(&state).await?;
    let options = snapshot.filter_options();

    info!(
        "Returning filter options: {} locations, {} statuses",
        options.locations.len(),
        options.statuses.len()
    );

    Ok(Json(FilterOptionsResponse {
        locations: options.locations,
        statuses: options.statuses.into_iter().map(Into::into).collect(),
        fetched_at: snapshot.fetched_at,
    }))
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_option_from_status() {
        let option = StatusOption::from(StockStatus::Critical);
        assert_eq!(option.code, "CRITICAL");
        assert_eq!(option.label, "CRITICAL (Stockout Risk)");
    }

    #[test]
    fn test_response_serialization() {
        let response = FilterOptionsResponse {
            locations: vec!["CLINIC_A".to_string()],
            statuses: vec![StockStatus::Good.into(), StockStatus::Critical.into()],
            fetched_at: chrono::Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("CLINIC_A"));
        assert!(json.contains("\"code\":\"CRITICAL\""));
        assert!(json.contains("CRITICAL (Stockout Risk)"));
    }
}
