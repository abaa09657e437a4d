//! Snapshot cache control endpoint

use crate::state::AppState;
use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Cache refresh response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Always "invalidated"; the next data request refetches
    pub status: String,
    /// When the invalidation happened
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Drop the memoized snapshot so the next request pulls fresh warehouse data
///
/// The refetch itself happens lazily. A warehouse outage therefore surfaces
/// on the next data request, not here.
pub async fn refresh_cache(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    state.invalidate().await;
    info!("Cache refresh requested");

    Json(RefreshResponse {
        status: "invalidated".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_response_serialization() {
        let response = RefreshResponse {
            status: "invalidated".to_string(),
            timestamp: chrono::Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"invalidated\""));
    }
}
