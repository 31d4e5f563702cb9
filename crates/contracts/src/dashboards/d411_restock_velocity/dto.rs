use serde::{Deserialize, Serialize};

/// Request for the restock velocity dashboard
///
/// `categories` is a comma-separated list. When absent every category is
/// selected; an empty string selects nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestockVelocityRequest {
    pub categories: Option<String>,
    pub top_n: Option<usize>,
}

/// Total refill volume of one SKU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuRefillVolume {
    pub sku: String,
    pub total_units_refilled: u64,
}

/// Restock performance KPIs over the filtered velocity records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityReport {
    /// Mean alert-to-refill wait; 0.0 when there are no records
    pub average_wait_minutes: f64,
    pub total_refill_actions: usize,
    /// Highest refill volume first, ties by ascending SKU
    pub top_skus: Vec<SkuRefillVolume>,
}

impl VelocityReport {
    pub fn empty() -> Self {
        Self {
            average_wait_minutes: 0.0,
            total_refill_actions: 0,
            top_skus: Vec::new(),
        }
    }
}

/// Response for the restock velocity dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestockVelocityResponse {
    /// Categories present in the snapshot, in first-seen order
    pub available_categories: Vec<String>,
    /// Categories the report was computed for
    pub selected_categories: Vec<String>,
    pub report: VelocityReport,
}
