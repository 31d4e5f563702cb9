use serde::{Deserialize, Serialize};

use crate::domain::a102_revenue_loss::RevenueRecord;

/// Revenue lost to stockouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueReport {
    pub total_potential_loss: f64,
    /// Input records, kept for the loss-vs-duration scatter plot
    pub records: Vec<RevenueRecord>,
}

/// Response for the revenue loss dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueLossResponse {
    /// Total formatted for the metric card, e.g. "$12,345.67"
    pub total_potential_loss_display: String,
    pub report: RevenueReport,
}
