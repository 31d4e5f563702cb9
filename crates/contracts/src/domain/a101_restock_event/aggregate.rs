use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::shared::csv_fields::deserialize_timestamp;

/// Shelf restock action (aggregate a101)
///
/// One row per low-stock alert that was answered by a refill. The event
/// source computes `wait_time_minutes` when the refill is scanned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestockEvent {
    /// Product identifier (e.g. "SKU_007")
    pub sku: String,

    /// Product category (e.g. "Beverages")
    pub category: String,

    /// When the shelf sensor raised the low-stock alert
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub alert_timestamp: NaiveDateTime,

    /// When the shelf was refilled
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub refill_timestamp: NaiveDateTime,

    /// Whole minutes between alert and refill
    #[serde(alias = "wait_time_mins")]
    pub wait_time_minutes: u32,

    pub units_refilled: u32,
}

impl RestockEvent {
    /// Whole minutes elapsed between alert and refill, rounded down
    pub fn elapsed_minutes(&self) -> i64 {
        (self.refill_timestamp - self.alert_timestamp).num_minutes()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.sku.trim().is_empty() {
            return Err("SKU must not be empty".into());
        }
        if self.refill_timestamp < self.alert_timestamp {
            return Err(format!(
                "SKU {}: refill at {} precedes alert at {}",
                self.sku, self.refill_timestamp, self.alert_timestamp
            ));
        }
        let elapsed = self.elapsed_minutes();
        if elapsed != i64::from(self.wait_time_minutes) {
            return Err(format!(
                "SKU {}: wait_time_minutes is {} but timestamps are {} minutes apart",
                self.sku, self.wait_time_minutes, elapsed
            ));
        }
        Ok(())
    }

    pub fn collection_name() -> &'static str {
        "restock_event"
    }
}
