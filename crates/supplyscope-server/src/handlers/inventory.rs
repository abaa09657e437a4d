//! Inventory table endpoint

use super::{ErrorResponse, FilterParams, HandlerError, load_snapshot};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use supplyscope_core::InventoryRecord;
use tracing::{info, warn};
use validator::Validate;

/// Query parameters for the inventory table
#[derive(Debug, Deserialize, Validate)]
pub struct InventoryQuery {
    /// Comma-separated location ids
    pub locations: Option<String>,

    /// Comma-separated status codes or labels
    pub statuses: Option<String>,

    /// Cap on returned rows (the page renders everything by default)
    #[validate(range(min = 1, max = 10000))]
    pub limit: Option<usize>,
}

/// Inventory table response
#[derive(Debug, Serialize)]
pub struct InventoryResponse {
    /// Filtered rows in snapshot order
    pub records: Vec<InventoryRecord>,

    /// Rows matching the filters before any limit
    pub total: usize,

    /// True when the filtered view is empty
    pub no_data: bool,

    /// When the underlying snapshot was fetched
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

/// List the filtered inventory rows for the dashboard table
///
/// # Errors
///
/// * `BAD_REQUEST` - Invalid query parameters
/// * `SERVICE_UNAVAILABLE` - Warehouse cannot be reached
///
/// # Example
///
/// ```text
/// GET /api/inventory?statuses=CRITICAL&limit=500
/// ```
pub async fn list_inventory(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InventoryQuery>,
) -> Result<Json<InventoryResponse>, HandlerError> {
    if let Err(validation_errors) = query.validate() {
        warn!("Invalid query parameters: {:?}", validation_errors);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid query parameters".to_string(),
                code: "INVALID_PARAMETERS".to_string(),
            }),
        ));
    }

    let selection = FilterParams {
        locations: query.locations,
        statuses: query.statuses,
    }
    .into_selection()?;

    let snapshot = load_snapshot(&state).await?;
    let mut records = snapshot.filtered(&selection);
    let total = records.len();

    if let Some(limit) = query.limit {
        records.truncate(limit);
    }

    info!("Returning {} of {} inventory rows", records.len(), total);

    Ok(Json(InventoryResponse {
        no_data: total == 0,
        records,
        total,
        fetched_at: snapshot.fetched_at,
    }))
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_query_validation() {
        let valid = InventoryQuery {
            locations: None,
            statuses: None,
            limit: Some(500),
        };
        assert!(valid.validate().is_ok());

        let zero_limit = InventoryQuery {
            locations: None,
            statuses: None,
            limit: Some(0),
        };
        assert!(zero_limit.validate().is_err());

        let oversized = InventoryQuery {
            locations: None,
            statuses: None,
            limit: Some(20_000),
        };
        assert!(oversized.validate().is_err());

        let unlimited = InventoryQuery {
            locations: None,
            statuses: None,
            limit: None,
        };
        assert!(unlimited.validate().is_ok());
    }

    #[test]
    fn test_response_serialization() {
        use supplyscope_core::StockStatus;

        let response = InventoryResponse {
            records: vec![InventoryRecord {
                location_id: "CLINIC_A".to_string(),
                item_name: "Masks".to_string(),
                current_stock: 12,
                suggested_reorder_qty: 88,
                status: StockStatus::Critical,
                days_remaining: 2.0,
                avg_daily_usage: 6.0,
            }],
            total: 1,
            no_data: false,
            fetched_at: chrono::Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"total\":1"));
        assert!(json.contains("Masks"));
        assert!(json.contains("CRITICAL (Stockout Risk)"));
    }

    #[test]
    fn test_empty_response_flags_no_data() {
        let response = InventoryResponse {
            records: Vec::new(),
            total: 0,
            no_data: true,
            fetched_at: chrono::Utc::now(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"records\":[]"));
        assert!(json.contains("\"no_data\":true"));
        assert_eq!(response.total, 0);
    }
}
