//! Chart specification endpoints
//!
//! Each endpoint returns a complete Vega-Lite spec with the data inlined, so
//! the page embeds it directly with vega-embed.

use super::{FilterParams, HandlerError, load_snapshot};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::Json,
};
use serde_json::{Value, json};
use std::sync::Arc;
use supplyscope_core::{InventoryRecord, StockStatus};
use tracing::info;

/// Color range aligned with the status ordering from `status_domain`
const STATUS_COLOR_RANGE: [&str; 3] = ["#2ca02c", "#ff7f0e", "#d62728"];

fn status_domain() -> Vec<&'static str> {
    StockStatus::all().iter().map(|s| s.label()).collect()
}

fn chart_rows(records: &[InventoryRecord]) -> Vec<Value> {
    records
        .iter()
        .map(|r| {
            json!({
                "location_id": r.location_id,
                "item_name": r.item_name,
                "current_stock": r.current_stock,
                "suggested_reorder_qty": r.suggested_reorder_qty,
                "status": r.status.label(),
                "days_remaining": r.days_remaining,
                "avg_daily_usage": r.avg_daily_usage,
            })
        })
        .collect()
}

/// Heatmap of days of stock remaining per location and item
///
/// # Errors
///
/// * `BAD_REQUEST` - Unknown status filter value
/// * `SERVICE_UNAVAILABLE` - Warehouse cannot be reached
pub async fn heatmap_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Value>, HandlerError> {
    let selection = params.into_selection()?;
    let snapshot = load_snapshot(&state).await?;
    let records = snapshot.filtered(&selection);
    info!("Building heatmap spec over {} rows", records.len());

    let domain_max = state.config.dashboard.heatmap_domain_max;
    let spec = json!({
        "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
        "title": "Days of Stock Remaining",
        "width": "container",
        "data": {"values": chart_rows(&records)},
        "mark": "rect",
        "encoding": {
            "x": {"field": "item_name", "type": "nominal", "title": "Item"},
            "y": {"field": "location_id", "type": "nominal", "title": "Location"},
            "color": {
                "field": "days_remaining",
                "type": "quantitative",
                "title": "Days Remaining",
                "scale": {
                    "scheme": "redyellowgreen",
                    "domain": [0.0, domain_max],
                    "clamp": true
                }
            },
            "tooltip": [
                {"field": "location_id", "title": "Location"},
                {"field": "item_name", "title": "Item"},
                {"field": "status", "title": "Status"},
                {"field": "current_stock", "title": "Current Stock"},
                {"field": "days_remaining", "title": "Days Remaining"}
            ]
        }
    });

    Ok(Json(spec))
}

/// Bar chart of suggested reorder quantities for rows needing attention
///
/// Only WARNING and CRITICAL rows appear; a fully healthy view yields a spec
/// with no data values.
///
/// # Errors
///
/// * `BAD_REQUEST` - Unknown status filter value
/// * `SERVICE_UNAVAILABLE` - Warehouse cannot be reached
pub async fn reorder_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Value>, HandlerError> {
    let selection = params.into_selection()?;
    let snapshot = load_snapshot(&state).await?;
    let records = snapshot.reorder_rows(&selection);
    info!("Building reorder spec over {} rows", records.len());

    let spec = json!({
        "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
        "title": "Suggested Reorder Quantities",
        "width": "container",
        "data": {"values": chart_rows(&records)},
        "mark": "bar",
        "encoding": {
            "x": {"field": "item_name", "type": "nominal", "title": "Item", "sort": "-y"},
            "y": {
                "field": "suggested_reorder_qty",
                "type": "quantitative",
                "title": "Suggested Reorder Qty"
            },
            "color": {
                "field": "status",
                "type": "nominal",
                "title": "Status",
                "scale": {"domain": status_domain(), "range": STATUS_COLOR_RANGE}
            },
            "tooltip": [
                {"field": "location_id", "title": "Location"},
                {"field": "item_name", "title": "Item"},
                {"field": "status", "title": "Status"},
                {"field": "suggested_reorder_qty", "title": "Suggested Reorder Qty"}
            ]
        }
    });

    Ok(Json(spec))
}

/// Scatter plot of average daily usage against current stock
///
/// # Errors
///
/// * `BAD_REQUEST` - Unknown status filter value
/// * `SERVICE_UNAVAILABLE` - Warehouse cannot be reached
pub async fn usage_chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Value>, HandlerError> {
    let selection = params.into_selection()?;
    let snapshot = load_snapshot(&state).await?;
    let records = snapshot.filtered(&selection);
    info!("Building usage spec over {} rows", records.len());

    let spec = json!({
        "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
        "title": "Usage vs Current Stock",
        "width": "container",
        "data": {"values": chart_rows(&records)},
        "mark": {"type": "point", "filled": true, "size": 90},
        "encoding": {
            "x": {
                "field": "avg_daily_usage",
                "type": "quantitative",
                "title": "Avg Daily Usage"
            },
            "y": {
                "field": "current_stock",
                "type": "quantitative",
                "title": "Current Stock"
            },
            "color": {
                "field": "status",
                "type": "nominal",
                "title": "Status",
                "scale": {"domain": status_domain(), "range": STATUS_COLOR_RANGE}
            },
            "tooltip": [
                {"field": "location_id", "title": "Location"},
                {"field": "item_name", "title": "Item"},
                {"field": "avg_daily_usage", "title": "Avg Daily Usage"},
                {"field": "current_stock", "title": "Current Stock"}
            ]
        }
    });

    Ok(Json(spec))
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(status: StockStatus) -> InventoryRecord {
        InventoryRecord {
            location_id: "CLINIC_A".to_string(),
            item_name: "Gloves".to_string(),
            current_stock: 20,
            suggested_reorder_qty: 30,
            status,
            days_remaining: 4.0,
            avg_daily_usage: 5.0,
        }
    }

    #[test]
    fn test_status_domain_matches_color_range() {
        assert_eq!(status_domain().len(), STATUS_COLOR_RANGE.len());
        assert_eq!(status_domain()[0], "GOOD");
        assert_eq!(status_domain()[2], "CRITICAL (Stockout Risk)");
    }

    #[test]
    fn test_chart_rows_carry_labels_and_numbers() {
        let rows = chart_rows(&[record(StockStatus::Warning)]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["status"], "WARNING (Reorder Soon)");
        assert_eq!(rows[0]["current_stock"], 20);
        assert_eq!(rows[0]["days_remaining"], 4.0);
    }

    #[test]
    fn test_chart_rows_empty_input() {
        assert!(chart_rows(&[]).is_empty());
    }
}
