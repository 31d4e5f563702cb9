use contracts::dashboards::d412_revenue_loss::{RevenueLossResponse, RevenueReport};
use contracts::domain::a102_revenue_loss::RevenueRecord;

use crate::shared::data::Snapshot;
use crate::shared::error::{validate_all, AnalyticsError};
use crate::shared::format::format_currency;

/// Get the stockout revenue loss summary
pub fn get_revenue_loss(snapshot: &Snapshot) -> Result<RevenueLossResponse, AnalyticsError> {
    let report = estimate(snapshot.revenue_records())?;
    Ok(RevenueLossResponse {
        total_potential_loss_display: format_currency(report.total_potential_loss),
        report,
    })
}

/// Sum precomputed per-SKU losses
///
/// `potential_revenue_lost` is taken as given; this never recomputes it from
/// price or velocity. Summation runs in input order over `f64`.
pub fn estimate(records: &[RevenueRecord]) -> Result<RevenueReport, AnalyticsError> {
    validate_all(RevenueRecord::collection_name(), records, RevenueRecord::validate)?;

    let total_potential_loss = records
        .iter()
        .fold(0.0_f64, |acc, r| acc + r.potential_revenue_lost);

    Ok(RevenueReport {
        total_potential_loss,
        records: records.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sku: &str, hours: f64, lost: f64) -> RevenueRecord {
        RevenueRecord {
            sku: sku.into(),
            oos_duration_hours: hours,
            potential_revenue_lost: lost,
        }
    }

    #[test]
    fn test_empty_input_is_zero() {
        let report = estimate(&[]).unwrap();
        assert_eq!(report.total_potential_loss, 0.0);
        assert!(report.records.is_empty());
    }

    #[test]
    fn test_total_is_sum_of_records() {
        let records = vec![
            record("SKU_001", 2.0, 150.25),
            record("SKU_002", 4.5, 980.5),
            record("SKU_003", 1.25, 33.0),
        ];

        let report = estimate(&records).unwrap();

        assert_eq!(report.total_potential_loss, 150.25 + 980.5 + 33.0);
        assert_eq!(report.records, records);
    }

    #[test]
    fn test_sum_order_independent_within_tolerance() {
        let records: Vec<_> = (1..=500)
            .map(|i| record(&format!("SKU_{:03}", i), 1.0, i as f64 * 1.37))
            .collect();
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = estimate(&records).unwrap().total_potential_loss;
        let backward = estimate(&reversed).unwrap().total_potential_loss;

        assert!((forward - backward).abs() < 1e-6);
    }

    #[test]
    fn test_negative_loss_rejected() {
        let records = vec![record("SKU_001", 2.0, 10.0), record("SKU_002", 2.0, -5.0)];
        let err = estimate(&records).unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::DataIntegrityViolation { index: 1, .. }
        ));
    }

    #[test]
    fn test_get_revenue_loss_formats_total() {
        let snapshot = Snapshot::new(
            vec![],
            vec![record("SKU_001", 3.0, 1200.5), record("SKU_002", 6.0, 34.25)],
            vec![],
        );

        let response = get_revenue_loss(&snapshot).unwrap();

        assert_eq!(response.total_potential_loss_display, "$1,234.75");
        assert_eq!(response.report.records.len(), 2);
    }
}
