//! Domain types and the snapshot filtering/aggregation logic

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Days-remaining value the warehouse emits when no runway can be estimated,
/// e.g. an item with no recorded usage. Rows at or above this value are
/// excluded from coverage averages.
pub const DAYS_NOT_APPLICABLE: f64 = 9999.0;

/// Risk classification of a (location, item) stock level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StockStatus {
    /// Stock is healthy, no action required
    Good,
    /// Stock should be reordered soon
    Warning,
    /// Imminent stockout risk, reorder immediately
    Critical,
}

impl StockStatus {
    /// Short machine-friendly code used in query parameters
    #[must_use]
    pub const fn short_code(self) -> &'static str {
        match self {
            Self::Good => "GOOD",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }

    /// Full label exactly as the warehouse view emits it
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "GOOD",
            Self::Warning => "WARNING (Reorder Soon)",
            Self::Critical => "CRITICAL (Stockout Risk)",
        }
    }

    /// All statuses in severity order, mildest first
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Good, Self::Warning, Self::Critical]
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StockStatus {
    type Err = crate::Error;

    /// Accepts either the short code or the full warehouse label,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let code = normalized
            .split_once(" (")
            .map_or(normalized.as_str(), |(code, _)| code);

        match code {
            "GOOD" => Ok(Self::Good),
            "WARNING" => Ok(Self::Warning),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(crate::Error::Other(format!("Unknown stock status: {s}"))),
        }
    }
}

impl Serialize for StockStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for StockStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One inventory-health snapshot row, keyed by (location, item)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Facility identifier
    pub location_id: String,

    /// Supply item name
    pub item_name: String,

    /// Units currently on hand
    pub current_stock: i64,

    /// Units the warehouse suggests reordering
    pub suggested_reorder_qty: i64,

    /// Risk classification
    pub status: StockStatus,

    /// Estimated days of supply left; [`DAYS_NOT_APPLICABLE`] when unknown
    pub days_remaining: f64,

    /// Average units consumed per day
    pub avg_daily_usage: f64,
}

impl InventoryRecord {
    /// Whether the days-remaining figure is a real runway estimate
    #[must_use]
    pub fn has_coverage_estimate(&self) -> bool {
        self.days_remaining < DAYS_NOT_APPLICABLE
    }
}

/// User-chosen membership filters over the two categorical fields.
///
/// `None` means no restriction on that field; `Some(empty)` is a deliberate
/// empty selection and matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    /// Selected location ids, if restricted
    pub locations: Option<Vec<String>>,

    /// Selected statuses, if restricted
    pub statuses: Option<Vec<StockStatus>>,
}

impl FilterSelection {
    /// A selection that matches every record
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            locations: None,
            statuses: None,
        }
    }

    /// Whether either field has a deliberate empty selection
    #[must_use]
    pub fn is_empty_selection(&self) -> bool {
        self.locations.as_ref().is_some_and(Vec::is_empty)
            || self.statuses.as_ref().is_some_and(Vec::is_empty)
    }

    /// Membership test for a single record
    #[must_use]
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        let location_ok = self
            .locations
            .as_ref()
            .is_none_or(|set| set.iter().any(|l| l == &record.location_id));
        let status_ok = self
            .statuses
            .as_ref()
            .is_none_or(|set| set.contains(&record.status));

        location_ok && status_ok
    }
}

/// Distinct filter choices derived from snapshot columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Distinct location ids, sorted
    pub locations: Vec<String>,

    /// Distinct statuses present in the snapshot, mildest first
    pub statuses: Vec<StockStatus>,
}

/// Scalar summary statistics over a filtered view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Rows in the filtered view
    pub total_records: usize,

    /// Distinct locations in the filtered view
    pub active_locations: usize,

    /// Rows classified critical
    pub critical_count: usize,

    /// Rows classified warning
    pub warning_count: usize,

    /// Mean days of coverage, sentinel rows excluded; `None` when no row
    /// carries a runway estimate
    pub avg_days_remaining: Option<f64>,

    /// True when the filtered view is empty
    pub no_data: bool,
}

/// Immutable inventory snapshot pulled from the warehouse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Snapshot rows
    pub records: Vec<InventoryRecord>,

    /// When the snapshot was fetched
    pub fetched_at: DateTime<Utc>,
}

impl InventorySnapshot {
    /// Create a snapshot stamped with the current time
    #[must_use]
    pub fn new(records: Vec<InventoryRecord>) -> Self {
        Self {
            records,
            fetched_at: Utc::now(),
        }
    }

    /// Rows matching the selection, in snapshot order
    #[must_use]
    pub fn filtered(&self, selection: &FilterSelection) -> Vec<InventoryRecord> {
        self.records
            .iter()
            .filter(|r| selection.matches(r))
            .cloned()
            .collect()
    }

    /// Filtered rows that need procurement action (status not GOOD)
    #[must_use]
    pub fn reorder_rows(&self, selection: &FilterSelection) -> Vec<InventoryRecord> {
        self.records
            .iter()
            .filter(|r| selection.matches(r) && r.status != StockStatus::Good)
            .cloned()
            .collect()
    }

    /// Distinct filter choices derived from the snapshot columns
    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        let locations: BTreeSet<&str> =
            self.records.iter().map(|r| r.location_id.as_str()).collect();
        let present: BTreeSet<StockStatus> = self.records.iter().map(|r| r.status).collect();

        FilterOptions {
            locations: locations.into_iter().map(str::to_string).collect(),
            statuses: StockStatus::all()
                .into_iter()
                .filter(|s| present.contains(s))
                .collect(),
        }
    }

    /// Summary statistics over the rows matching the selection
    #[must_use]
    pub fn summarize(&self, selection: &FilterSelection) -> SummaryMetrics {
        let mut total_records = 0usize;
        let mut critical_count = 0usize;
        let mut warning_count = 0usize;
        let mut coverage_sum = 0.0f64;
        let mut coverage_count = 0usize;
        let mut locations: BTreeSet<&str> = BTreeSet::new();

        for record in self.records.iter().filter(|r| selection.matches(r)) {
            total_records += 1;
            locations.insert(record.location_id.as_str());

            match record.status {
                StockStatus::Critical => critical_count += 1,
                StockStatus::Warning => warning_count += 1,
                StockStatus::Good => {}
            }

            if record.has_coverage_estimate() {
                coverage_sum += record.days_remaining;
                coverage_count += 1;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let avg_days_remaining =
            (coverage_count > 0).then(|| coverage_sum / coverage_count as f64);

        SummaryMetrics {
            total_records,
            active_locations: locations.len(),
            critical_count,
            warning_count,
            avg_days_remaining,
            no_data: total_records == 0,
        }
    }
}
