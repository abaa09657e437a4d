//! Read-only query operations against the warehouse view

use crate::models::InventoryRecordDb;
use sqlx::PgPool;
use supplyscope_core::{Error, InventorySnapshot, Result};

/// Inventory-health view operations
#[derive(Debug)]
pub struct InventoryQueries;

impl InventoryQueries {
    /// Full unfiltered read of the inventory-health view.
    ///
    /// Filtering is deliberately done in memory on the snapshot; the
    /// warehouse is only ever asked for the complete table.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn fetch_all(pool: &PgPool) -> Result<Vec<InventoryRecordDb>> {
        let query = r"
            SELECT location_id, item_name, current_stock, suggested_reorder_qty,
                   status, days_remaining, avg_daily_usage
            FROM inventory_health_metrics
            ORDER BY location_id, item_name
        ";

        sqlx::query_as::<_, InventoryRecordDb>(query)
            .fetch_all(pool)
            .await
            .map_err(|e| Error::WarehouseUnavailable(e.to_string()))
    }

    /// Fetch a fresh domain snapshot from the warehouse
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row carries an
    /// unrecognized status label.
    pub async fn fetch_snapshot(pool: &PgPool) -> Result<InventorySnapshot> {
        let rows = Self::fetch_all(pool).await?;

        tracing::info!("Fetched {} inventory rows from warehouse", rows.len());

        let records = rows
            .into_iter()
            .map(InventoryRecordDb::into_record)
            .collect::<Result<Vec<_>>>()?;

        Ok(InventorySnapshot::new(records))
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_all_unreachable_warehouse() {
        let pool = sqlx::PgPool::connect_lazy("postgresql://invalid:5432/nonexistent")
            .expect("Failed to create test pool");

        let result = InventoryQueries::fetch_all(&pool).await;
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            Error::WarehouseUnavailable(_)
        ));
    }

    #[tokio::test]
    async fn test_fetch_snapshot_unreachable_warehouse() {
        let pool = sqlx::PgPool::connect_lazy("postgresql://invalid:5432/nonexistent")
            .expect("Failed to create test pool");

        let result = InventoryQueries::fetch_snapshot(&pool).await;
        assert!(result.is_err());
    }
}
