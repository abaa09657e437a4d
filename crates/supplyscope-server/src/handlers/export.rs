//! CSV export endpoint

use super::{ErrorResponse, FilterParams, HandlerError, load_snapshot};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use supplyscope_core::InventoryRecord;
use tracing::{error, info};

/// Export the urgent reorder list as a CSV attachment
///
/// Rows are the WARNING and CRITICAL subset of the filtered view, in snapshot
/// order. An all-healthy view still produces a valid file with only the
/// header row.
///
/// # Errors
///
/// * `BAD_REQUEST` - Unknown status filter value
/// * `SERVICE_UNAVAILABLE` - Warehouse cannot be reached
pub async fn export_reorder_csv(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Result<Response, HandlerError> {
    let selection = params.into_selection()?;
    let snapshot = load_snapshot(&state).await?;
    let records = snapshot.reorder_rows(&selection);
    info!("Exporting {} reorder rows as CSV", records.len());

    let body = write_csv(&records).map_err(|e| {
        error!("Failed to serialize CSV export: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to build CSV export".to_string(),
                code: "EXPORT_FAILED".to_string(),
            }),
        )
    })?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.config.dashboard.export_filename
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

fn write_csv(records: &[InventoryRecord]) -> csv::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "location_id",
        "item_name",
        "status",
        "current_stock",
        "suggested_reorder_qty",
    ])?;

    for record in records {
        writer.write_record([
            record.location_id.as_str(),
            record.item_name.as_str(),
            record.status.label(),
            &record.current_stock.to_string(),
            &record.suggested_reorder_qty.to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use supplyscope_core::StockStatus;

    #[test]
    fn test_csv_header_only_when_empty() {
        let csv = write_csv(&[]).unwrap();
        assert_eq!(
            csv,
            "location_id,item_name,status,current_stock,suggested_reorder_qty\n"
        );
    }

    #[test]
    fn test_csv_rows_use_full_status_labels() {
        let records = vec![
            InventoryRecord {
                location_id: "CLINIC_A".to_string(),
                item_name: "Gloves".to_string(),
                current_stock: 5,
                suggested_reorder_qty: 45,
                status: StockStatus::Critical,
                days_remaining: 1.0,
                avg_daily_usage: 5.0,
            },
            InventoryRecord {
                location_id: "CLINIC_B".to_string(),
                item_name: "Masks".to_string(),
                current_stock: 30,
                suggested_reorder_qty: 20,
                status: StockStatus::Warning,
                days_remaining: 6.0,
                avg_daily_usage: 5.0,
            },
        ];

        let csv = write_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "CLINIC_A,Gloves,CRITICAL (Stockout Risk),5,45");
        assert_eq!(lines[2], "CLINIC_B,Masks,WARNING (Reorder Soon),30,20");
    }

    #[test]
    fn test_csv_quotes_fields_with_commas() {
        let records = vec![InventoryRecord {
            location_id: "CLINIC_A".to_string(),
            item_name: "Syringes, 10ml".to_string(),
            current_stock: 8,
            suggested_reorder_qty: 32,
            status: StockStatus::Warning,
            days_remaining: 4.0,
            avg_daily_usage: 2.0,
        }];

        let csv = write_csv(&records).unwrap();
        assert!(csv.contains("\"Syringes, 10ml\""));
    }
}
