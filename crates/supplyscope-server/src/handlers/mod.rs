//! HTTP handlers for the dashboard

pub mod cache;
pub mod charts;
pub mod export;
pub mod filters;
pub mod health;
pub mod inventory;
pub mod metrics;
pub mod pages;

use crate::state::AppState;
use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use supplyscope_core::{Error, FilterSelection, InventorySnapshot, StockStatus};
use tracing::{error, warn};

/// Error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

/// Handler error type: status plus structured body
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Query parameters shared by every filter-honoring endpoint.
///
/// Each parameter is a comma-separated membership list. An absent parameter
/// leaves the field unrestricted; a present-but-empty one is a deliberate
/// empty selection that matches nothing.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    /// Comma-separated location ids
    pub locations: Option<String>,

    /// Comma-separated status codes or labels
    pub statuses: Option<String>,
}

impl FilterParams {
    /// Parse the raw parameters into a domain selection
    ///
    /// # Errors
    ///
    /// Returns a `BAD_REQUEST` response for unknown status values.
    pub fn into_selection(self) -> Result<FilterSelection, HandlerError> {
        let locations = self.locations.map(|raw| parse_list(&raw));

        let statuses = match self.statuses {
            None => None,
            Some(raw) => {
                let mut parsed = Vec::new();
                for token in parse_list(&raw) {
                    match token.parse::<StockStatus>() {
                        Ok(status) => parsed.push(status),
                        Err(e) => {
                            warn!("Rejected status filter value: {}", e);
                            return Err((
                                StatusCode::BAD_REQUEST,
                                Json(ErrorResponse {
                                    error: format!("Unknown status value: {token}"),
                                    code: "INVALID_PARAMETERS".to_string(),
                                }),
                            ));
                        }
                    }
                }
                Some(parsed)
            }
        };

        Ok(FilterSelection {
            locations,
            statuses,
        })
    }
}

/// Split a comma-separated list, dropping blank tokens.
///
/// An entirely empty string yields an empty list, which downstream means
/// "match nothing" rather than "unrestricted".
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fetch the memoized snapshot, mapping a warehouse failure to 503
///
/// # Errors
///
/// Returns a `SERVICE_UNAVAILABLE` response if the warehouse cannot be
/// reached.
pub async fn load_snapshot(state: &AppState) -> Result<InventorySnapshot, HandlerError> {
    state.snapshot().await.map_err(|e| {
        error!("Failed to load inventory snapshot: {}", e);
        let code = match e {
            Error::WarehouseUnavailable(_) | Error::Database(_) => "WAREHOUSE_UNAVAILABLE",
            _ => "INTERNAL_ERROR",
        };
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Failed to reach the inventory warehouse".to_string(),
                code: code.to_string(),
            }),
        )
    })
}
