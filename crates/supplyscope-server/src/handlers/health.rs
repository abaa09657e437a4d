//! Health check endpoints for monitoring and diagnostics

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Warehouse connectivity status
    pub warehouse: WarehouseHealth,
}

/// Warehouse connectivity status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseHealth {
    /// Connection status
    pub connected: bool,
    /// Ping response time in milliseconds
    pub response_time_ms: u64,
    /// Idle connections in the pool
    pub idle_connections: u32,
}

/// Readiness check response (simpler than health)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Service readiness status
    pub ready: bool,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Basic health check endpoint for monitoring systems
///
/// Pings the warehouse and reports pool statistics. Returns HTTP 503 when the
/// warehouse cannot be reached.
///
/// # Errors
///
/// * `SERVICE_UNAVAILABLE` - Warehouse ping failed
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let start_time = std::time::Instant::now();

    if let Err(e) = sqlx::query("SELECT 1").fetch_one(&state.pool).await {
        error!("Warehouse health check failed: {}", e);
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let response_time_ms = u64::try_from(start_time.elapsed().as_millis()).unwrap_or(u64::MAX);

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        warehouse: WarehouseHealth {
            connected: true,
            response_time_ms,
            idle_connections: u32::try_from(state.pool.num_idle()).unwrap_or(u32::MAX),
        },
    };

    info!("Health check completed in {}ms", response_time_ms);
    Ok(Json(response))
}

/// Readiness check endpoint for Kubernetes-style health checks
///
/// Returns 200 OK if the service is ready to accept traffic
///
/// # Errors
///
/// * `SERVICE_UNAVAILABLE` - Warehouse ping failed
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReadinessResponse>, StatusCode> {
    match sqlx::query("SELECT 1").fetch_one(&state.pool).await {
        Ok(_) => Ok(Json(ReadinessResponse {
            ready: true,
            timestamp: chrono::Utc::now(),
        })),
        Err(e) => {
            error!("Readiness check failed - warehouse not accessible: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
