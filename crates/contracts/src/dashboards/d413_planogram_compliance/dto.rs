use serde::{Deserialize, Serialize};

use crate::enums::PlanogramErrorType;

/// Request for the planogram compliance map
///
/// Dimensions are signed so that non-positive values reach validation and
/// are reported as invalid arguments instead of failing query parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanogramComplianceRequest {
    pub grid_width: Option<i64>,
    pub grid_height: Option<i64>,
    pub sample_size: Option<usize>,
}

/// One populated heatmap bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub bin_x: usize,
    pub bin_y: usize,
    /// Share of compliant slots in the bin, 0.0..=1.0
    pub compliance_ratio: f64,
    pub audited_slots: usize,
}

/// Audit row projected for the "recent compliance errors" table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonCompliantSlot {
    pub shelf_id: String,
    pub slot_id: u32,
    pub error_type: PlanogramErrorType,
}

/// Spatial compliance map
///
/// Bins without audits have no entry in `cells`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub grid_width: u32,
    pub grid_height: u32,
    /// `grid_width + 1` bin edges along x; empty when there is no data
    pub x_edges: Vec<f64>,
    /// `grid_height + 1` bin edges along y; empty when there is no data
    pub y_edges: Vec<f64>,
    /// Populated bins ordered by (bin_x, bin_y)
    pub cells: Vec<HeatmapCell>,
    pub non_compliant_sample: Vec<NonCompliantSlot>,
}

impl ComplianceReport {
    /// Compliance ratio of a bin, `None` when nothing was audited there
    pub fn ratio(&self, bin_x: usize, bin_y: usize) -> Option<f64> {
        self.cells
            .iter()
            .find(|c| c.bin_x == bin_x && c.bin_y == bin_y)
            .map(|c| c.compliance_ratio)
    }

    pub fn audited_slots(&self) -> usize {
        self.cells.iter().map(|c| c.audited_slots).sum()
    }
}
