use contracts::dashboards::d411_restock_velocity::{
    RestockVelocityRequest, RestockVelocityResponse, SkuRefillVolume, VelocityReport,
};
use contracts::domain::a101_restock_event::RestockEvent;
use std::collections::HashMap;

use super::filter::{available_categories, CategorySelection};
use crate::shared::config::DashboardConfig;
use crate::shared::data::Snapshot;
use crate::shared::error::{validate_all, AnalyticsError};

/// Length of the high-velocity product ranking
pub const DEFAULT_TOP_N: usize = 10;

/// Get restock performance for the requested categories
pub fn get_restock_velocity(
    snapshot: &Snapshot,
    request: &RestockVelocityRequest,
    defaults: &DashboardConfig,
) -> Result<RestockVelocityResponse, AnalyticsError> {
    let selection = CategorySelection::parse(request.categories.as_deref())?;
    let top_n = request.top_n.unwrap_or(defaults.top_n);

    // Validate before filtering so a violation index points into the snapshot
    validate_all(
        RestockEvent::collection_name(),
        snapshot.restock_events(),
        RestockEvent::validate,
    )?;

    let available = available_categories(snapshot.restock_events());
    let filtered = selection.apply(snapshot.restock_events());
    let report = aggregate(&filtered, top_n)?;

    Ok(RestockVelocityResponse {
        selected_categories: selection.selected(&available),
        available_categories: available,
        report,
    })
}

/// Compute wait-time KPIs and the refill-volume ranking
///
/// The average wait of an empty input is 0.0. The ranking sums
/// `units_refilled` per SKU, orders by the sum descending with ties broken
/// by ascending SKU, and keeps the first `top_n` entries.
pub fn aggregate(records: &[RestockEvent], top_n: usize) -> Result<VelocityReport, AnalyticsError> {
    if top_n == 0 {
        return Err(AnalyticsError::invalid_argument("top_n must be positive"));
    }
    validate_all(RestockEvent::collection_name(), records, RestockEvent::validate)?;

    if records.is_empty() {
        return Ok(VelocityReport::empty());
    }

    let total_wait: u64 = records.iter().map(|r| u64::from(r.wait_time_minutes)).sum();
    let average_wait_minutes = total_wait as f64 / records.len() as f64;

    let mut units_by_sku: HashMap<&str, u64> = HashMap::new();
    for record in records {
        *units_by_sku.entry(record.sku.as_str()).or_insert(0) += u64::from(record.units_refilled);
    }

    let mut ranking: Vec<SkuRefillVolume> = units_by_sku
        .into_iter()
        .map(|(sku, total_units_refilled)| SkuRefillVolume {
            sku: sku.to_string(),
            total_units_refilled,
        })
        .collect();
    ranking.sort_by(|a, b| {
        b.total_units_refilled
            .cmp(&a.total_units_refilled)
            .then_with(|| a.sku.cmp(&b.sku))
    });
    ranking.truncate(top_n);

    Ok(VelocityReport {
        average_wait_minutes,
        total_refill_actions: records.len(),
        top_skus: ranking,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn base_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 20)
            .unwrap()
            .and_hms_opt(6, 30, 0)
            .unwrap()
    }

    fn event(sku: &str, category: &str, wait: u32, units: u32) -> RestockEvent {
        RestockEvent {
            sku: sku.into(),
            category: category.into(),
            alert_timestamp: base_time(),
            refill_timestamp: base_time() + Duration::minutes(i64::from(wait)),
            wait_time_minutes: wait,
            units_refilled: units,
        }
    }

    fn defaults() -> DashboardConfig {
        DashboardConfig {
            top_n: DEFAULT_TOP_N,
            grid_width: 10,
            grid_height: 4,
            error_sample_size: 10,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        let report = aggregate(&[], DEFAULT_TOP_N).unwrap();
        assert_eq!(report.total_refill_actions, 0);
        assert_eq!(report.average_wait_minutes, 0.0);
        assert!(report.top_skus.is_empty());
    }

    #[test]
    fn test_tied_volumes_ordered_by_sku() {
        let records = vec![
            event("SKU_B", "Snacks", 30, 30),
            event("SKU_A", "Snacks", 10, 10),
            event("SKU_A", "Snacks", 20, 20),
        ];

        let report = aggregate(&records, DEFAULT_TOP_N).unwrap();

        assert_eq!(report.average_wait_minutes, 20.0);
        assert_eq!(report.total_refill_actions, 3);
        assert_eq!(
            report.top_skus,
            vec![
                SkuRefillVolume {
                    sku: "SKU_A".into(),
                    total_units_refilled: 30
                },
                SkuRefillVolume {
                    sku: "SKU_B".into(),
                    total_units_refilled: 30
                },
            ]
        );
    }

    #[test]
    fn test_ranking_descending_by_volume() {
        let records = vec![
            event("SKU_001", "Dairy", 5, 10),
            event("SKU_002", "Dairy", 5, 45),
            event("SKU_003", "Dairy", 5, 25),
            event("SKU_001", "Dairy", 5, 10),
        ];
        let report = aggregate(&records, DEFAULT_TOP_N).unwrap();
        let order: Vec<_> = report.top_skus.iter().map(|s| s.sku.as_str()).collect();
        assert_eq!(order, vec!["SKU_002", "SKU_003", "SKU_001"]);
    }

    #[test]
    fn test_ranking_truncated_with_many_skus() {
        let records: Vec<_> = (0..1200)
            .map(|i| event(&format!("SKU_{:04}", i), "Frozen", 12, (i % 50) as u32))
            .collect();

        let report = aggregate(&records, DEFAULT_TOP_N).unwrap();

        assert_eq!(report.top_skus.len(), DEFAULT_TOP_N);
        assert!(report.top_skus.iter().all(|s| s.total_units_refilled == 49));
        assert_eq!(report.top_skus[0].sku, "SKU_0049");
        assert_eq!(report.total_refill_actions, 1200);
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let err = aggregate(&[], 0).unwrap_err();
        assert_eq!(err.kind(), "invalid_argument");
    }

    #[test]
    fn test_inconsistent_record_rejected() {
        let mut bad = event("SKU_009", "Produce", 15, 20);
        bad.wait_time_minutes = 90;
        let records = vec![event("SKU_001", "Produce", 15, 20), bad];

        let err = aggregate(&records, DEFAULT_TOP_N).unwrap_err();

        match err {
            AnalyticsError::DataIntegrityViolation {
                collection, index, ..
            } => {
                assert_eq!(collection, "restock_event");
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_get_restock_velocity_applies_category_filter() {
        let snapshot = Snapshot::new(
            vec![
                event("SKU_001", "Dairy", 10, 10),
                event("SKU_002", "Snacks", 50, 40),
                event("SKU_003", "Dairy", 30, 15),
            ],
            vec![],
            vec![],
        );
        let request = RestockVelocityRequest {
            categories: Some("Dairy".into()),
            top_n: None,
        };

        let response = get_restock_velocity(&snapshot, &request, &defaults()).unwrap();

        assert_eq!(response.available_categories, vec!["Dairy", "Snacks"]);
        assert_eq!(response.selected_categories, vec!["Dairy"]);
        assert_eq!(response.report.total_refill_actions, 2);
        assert_eq!(response.report.average_wait_minutes, 20.0);
        assert_eq!(response.report.top_skus[0].sku, "SKU_003");
    }

    #[test]
    fn test_get_restock_velocity_defaults_to_all_categories() {
        let snapshot = Snapshot::new(
            vec![
                event("SKU_001", "Dairy", 10, 10),
                event("SKU_002", "Snacks", 50, 40),
            ],
            vec![],
            vec![],
        );
        let request = RestockVelocityRequest {
            categories: None,
            top_n: Some(1),
        };

        let response = get_restock_velocity(&snapshot, &request, &defaults()).unwrap();

        assert_eq!(response.selected_categories, vec!["Dairy", "Snacks"]);
        assert_eq!(response.report.total_refill_actions, 2);
        assert_eq!(response.report.top_skus.len(), 1);
    }

    #[test]
    fn test_violation_index_refers_to_snapshot_row() {
        let mut bad_dairy = event("SKU_BAD", "Dairy", 10, 5);
        bad_dairy.wait_time_minutes = 99;
        let mut bad_snacks = event("SKU_BAD2", "Snacks", 10, 5);
        bad_snacks.wait_time_minutes = 77;
        let snapshot = Snapshot::new(
            vec![
                event("SKU_001", "Snacks", 10, 10),
                event("SKU_002", "Snacks", 20, 10),
                event("SKU_003", "Snacks", 30, 10),
                bad_dairy,
                bad_snacks,
            ],
            vec![],
            vec![],
        );

        for categories in ["Dairy", "Frozen", "Snacks"] {
            let request = RestockVelocityRequest {
                categories: Some(categories.into()),
                top_n: None,
            };

            let err = get_restock_velocity(&snapshot, &request, &defaults()).unwrap_err();

            match err {
                AnalyticsError::DataIntegrityViolation {
                    collection, index, ..
                } => {
                    assert_eq!(collection, "restock_event");
                    assert_eq!(index, 3, "categories={categories}");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
