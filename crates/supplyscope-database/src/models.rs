//! Row models for the inventory-health warehouse view

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use supplyscope_core::{Error, InventoryRecord, Result};

/// Raw row of the `inventory_health_metrics` view.
///
/// Column names follow the warehouse schema; the status arrives as the full
/// display label and is parsed into the domain enum on conversion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryRecordDb {
    /// Facility identifier
    pub location_id: String,

    /// Supply item name
    pub item_name: String,

    /// Units currently on hand
    pub current_stock: i64,

    /// Units the warehouse suggests reordering
    pub suggested_reorder_qty: i64,

    /// Status label, e.g. `CRITICAL (Stockout Risk)`
    pub status: String,

    /// Days of supply remaining; sentinel for "not applicable"
    pub days_remaining: f64,

    /// Average units consumed per day
    pub avg_daily_usage: f64,
}

impl InventoryRecordDb {
    /// Convert the raw row into the domain record
    ///
    /// # Errors
    ///
    /// Returns an error if the status label cannot be parsed.
    pub fn into_record(self) -> Result<InventoryRecord> {
        let status = self.status.parse().map_err(|_| {
            Error::Database(format!(
                "Unrecognized status label '{}' for {}/{}",
                self.status, self.location_id, self.item_name
            ))
        })?;

        Ok(InventoryRecord {
            location_id: self.location_id,
            item_name: self.item_name,
            current_stock: self.current_stock,
            suggested_reorder_qty: self.suggested_reorder_qty,
            status,
            days_remaining: self.days_remaining,
            avg_daily_usage: self.avg_daily_usage,
        })
    }
}
