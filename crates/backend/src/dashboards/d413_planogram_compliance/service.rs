use contracts::dashboards::d413_planogram_compliance::{
    ComplianceReport, HeatmapCell, NonCompliantSlot, PlanogramComplianceRequest,
};
use contracts::domain::a103_planogram_audit::ComplianceRecord;
use std::collections::BTreeMap;

use crate::shared::config::DashboardConfig;
use crate::shared::data::Snapshot;
use crate::shared::error::{validate_all, AnalyticsError};

/// Rows in the "recent compliance errors" table
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Upper bound for either grid dimension accepted from requests
pub const MAX_GRID_DIMENSION: i64 = 1_000;

/// Get the compliance heatmap, falling back to configured grid dimensions
pub fn get_planogram_compliance(
    snapshot: &Snapshot,
    request: &PlanogramComplianceRequest,
    defaults: &DashboardConfig,
) -> Result<ComplianceReport, AnalyticsError> {
    let grid_width = grid_dimension("grid_width", request.grid_width, defaults.grid_width)?;
    let grid_height = grid_dimension("grid_height", request.grid_height, defaults.grid_height)?;
    let sample_size = request.sample_size.unwrap_or(defaults.error_sample_size);

    build(
        snapshot.compliance_records(),
        grid_width,
        grid_height,
        sample_size,
    )
}

/// Validate a requested grid dimension
pub fn grid_dimension(name: &str, requested: Option<i64>, default: u32) -> Result<u32, AnalyticsError> {
    let value = requested.unwrap_or(i64::from(default));
    if value <= 0 {
        return Err(AnalyticsError::invalid_argument(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    if value > MAX_GRID_DIMENSION {
        return Err(AnalyticsError::invalid_argument(format!(
            "{} must not exceed {}, got {}",
            name, MAX_GRID_DIMENSION, value
        )));
    }
    u32::try_from(value).map_err(|_| AnalyticsError::invalid_argument(format!("{} out of range", name)))
}

/// Equal-width binning of one coordinate axis over the observed range
#[derive(Debug, Clone, Copy)]
struct AxisBins {
    min: i64,
    /// max - min, or 1 when every value is the same
    span: i64,
    bins: u32,
}

impl AxisBins {
    fn fit(values: impl Iterator<Item = i64>, bins: u32) -> Option<Self> {
        let (min, max) = values.fold(None, |range: Option<(i64, i64)>, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
        let span = if max > min { max - min } else { 1 };
        Some(Self { min, span, bins })
    }

    /// Half-open `[lo, hi)` bins, the last one closed so the maximum lands in it.
    /// Integer arithmetic keeps boundary values exact.
    fn index(&self, value: i64) -> usize {
        let offset = i128::from(value) - i128::from(self.min);
        let raw = offset * i128::from(self.bins) / i128::from(self.span);
        raw.clamp(0, i128::from(self.bins) - 1) as usize
    }

    fn edges(&self) -> Vec<f64> {
        let width = self.span as f64 / f64::from(self.bins);
        (0..=self.bins)
            .map(|i| self.min as f64 + width * f64::from(i))
            .collect()
    }
}

/// Bin audits into a `grid_width` × `grid_height` compliance map
///
/// Each populated bin gets the mean of `is_compliant` (as 1/0) over its
/// records; bins without records are left out rather than reported as 0%.
/// The non-compliant sample keeps input order and is cut to `sample_size`.
pub fn build(
    records: &[ComplianceRecord],
    grid_width: u32,
    grid_height: u32,
    sample_size: usize,
) -> Result<ComplianceReport, AnalyticsError> {
    if grid_width == 0 || grid_height == 0 {
        return Err(AnalyticsError::invalid_argument(format!(
            "grid dimensions must be positive, got {}x{}",
            grid_width, grid_height
        )));
    }
    validate_all(
        ComplianceRecord::collection_name(),
        records,
        ComplianceRecord::validate,
    )?;

    let non_compliant_sample = records
        .iter()
        .filter(|r| !r.is_compliant)
        .take(sample_size)
        .map(|r| NonCompliantSlot {
            shelf_id: r.shelf_id.clone(),
            slot_id: r.slot_id,
            error_type: r.error_type,
        })
        .collect();

    let (Some(x_axis), Some(y_axis)) = (
        AxisBins::fit(records.iter().map(|r| r.x_coord), grid_width),
        AxisBins::fit(records.iter().map(|r| r.y_coord), grid_height),
    ) else {
        return Ok(ComplianceReport {
            grid_width,
            grid_height,
            x_edges: Vec::new(),
            y_edges: Vec::new(),
            cells: Vec::new(),
            non_compliant_sample,
        });
    };

    // (compliant, audited) per bin
    let mut tallies: BTreeMap<(usize, usize), (usize, usize)> = BTreeMap::new();
    for record in records {
        let key = (x_axis.index(record.x_coord), y_axis.index(record.y_coord));
        let tally = tallies.entry(key).or_insert((0, 0));
        if record.is_compliant {
            tally.0 += 1;
        }
        tally.1 += 1;
    }

    let cells = tallies
        .into_iter()
        .map(|((bin_x, bin_y), (compliant, audited))| HeatmapCell {
            bin_x,
            bin_y,
            compliance_ratio: compliant as f64 / audited as f64,
            audited_slots: audited,
        })
        .collect();

    Ok(ComplianceReport {
        grid_width,
        grid_height,
        x_edges: x_axis.edges(),
        y_edges: y_axis.edges(),
        cells,
        non_compliant_sample,
    })
}
