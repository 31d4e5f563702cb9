use serde::{Deserialize, Serialize};

/// Stockout revenue-loss record (aggregate a102)
///
/// `potential_revenue_lost` arrives precomputed by the data source
/// (unit price × sales velocity × out-of-stock hours) and is never
/// re-derived on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub sku: String,

    /// How long the product was out of stock, in hours
    pub oos_duration_hours: f64,

    /// Estimated lost revenue, in currency units
    pub potential_revenue_lost: f64,
}

impl RevenueRecord {
    pub fn validate(&self) -> Result<(), String> {
        if !self.oos_duration_hours.is_finite() || self.oos_duration_hours < 0.0 {
            return Err(format!(
                "SKU {}: oos_duration_hours must be a non-negative number, got {}",
                self.sku, self.oos_duration_hours
            ));
        }
        if !self.potential_revenue_lost.is_finite() || self.potential_revenue_lost < 0.0 {
            return Err(format!(
                "SKU {}: potential_revenue_lost must be a non-negative number, got {}",
                self.sku, self.potential_revenue_lost
            ));
        }
        Ok(())
    }

    pub fn collection_name() -> &'static str {
        "revenue_loss"
    }
}
