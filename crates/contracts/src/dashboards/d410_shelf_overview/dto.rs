use serde::{Deserialize, Serialize};

use crate::dashboards::d411_restock_velocity::VelocityReport;
use crate::dashboards::d412_revenue_loss::RevenueReport;
use crate::dashboards::d413_planogram_compliance::ComplianceReport;

/// Request for the combined dashboard (all three tabs at once)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShelfOverviewRequest {
    /// Comma-separated category filter for the velocity tab
    pub categories: Option<String>,
    pub grid_width: Option<i64>,
    pub grid_height: Option<i64>,
}

/// Response for the combined dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelfOverviewResponse {
    pub selected_categories: Vec<String>,
    pub velocity: VelocityReport,
    pub revenue: RevenueReport,
    pub compliance: ComplianceReport,
}
