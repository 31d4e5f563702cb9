use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};
use contracts::domain::a101_restock_event::RestockEvent;
use contracts::domain::a102_revenue_loss::RevenueRecord;
use contracts::domain::a103_planogram_audit::ComplianceRecord;
use contracts::enums::PlanogramErrorType;
use contracts::usecases::u510_generate_sample_data::{
    GenerateSampleDataRequest, GenerateSampleDataResponse,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::Path;

use crate::shared::data::{CsvSnapshotSource, Snapshot};

pub const DEFAULT_VELOCITY_ROWS: usize = 200;

const SKU_COUNT: usize = 20;
const CATEGORIES: [&str; 5] = ["Beverages", "Snacks", "Dairy", "Frozen", "Produce"];
const SHELVES: [&str; 4] = ["A1-B1", "A1-B2", "A2-B1", "A2-B2"];
const SLOTS_PER_SHELF: u32 = 10;
const COMPLIANCE_PROBABILITY: f64 = 0.85;

/// Executor для UseCase генерации демо-данных
///
/// Writes a synthetic snapshot into the files the dashboard reads from.
pub struct SampleDataExecutor {
    target: CsvSnapshotSource,
}

impl SampleDataExecutor {
    pub fn new(target: CsvSnapshotSource) -> Self {
        Self { target }
    }

    pub fn execute(&self, request: &GenerateSampleDataRequest) -> Result<GenerateSampleDataResponse> {
        let velocity_rows = request.velocity_rows.unwrap_or(DEFAULT_VELOCITY_ROWS);
        let mut rng = match request.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        tracing::info!(
            "Generating sample data: {} restock rows, seed {:?}",
            velocity_rows,
            request.seed
        );

        let now = chrono::Local::now().naive_local();
        let snapshot = generate_snapshot(&mut rng, velocity_rows, now);

        write_csv(&self.target.velocity_path, snapshot.restock_events())?;
        write_csv(&self.target.revenue_path, snapshot.revenue_records())?;
        write_csv(&self.target.compliance_path, snapshot.compliance_records())?;

        let (velocity_rows, revenue_rows, compliance_rows) = snapshot.counts();
        tracing::info!(
            "Sample data written: {} restock, {} revenue, {} compliance rows",
            velocity_rows,
            revenue_rows,
            compliance_rows
        );

        Ok(GenerateSampleDataResponse {
            velocity_rows,
            revenue_rows,
            compliance_rows,
            files: self
                .target
                .paths()
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        })
    }
}

/// Build a synthetic snapshot relative to `now`
pub fn generate_snapshot(rng: &mut StdRng, velocity_rows: usize, now: NaiveDateTime) -> Snapshot {
    let skus: Vec<String> = (1..=SKU_COUNT).map(|i| format!("SKU_{:03}", i)).collect();

    let restock_events = (0..velocity_rows)
        .map(|_| {
            let alert = now
                - Duration::days(rng.gen_range(0..7))
                - Duration::hours(rng.gen_range(0..24));
            let wait: u32 = rng.gen_range(5..120);
            RestockEvent {
                sku: skus[rng.gen_range(0..skus.len())].clone(),
                category: CATEGORIES[rng.gen_range(0..CATEGORIES.len())].to_string(),
                alert_timestamp: alert,
                refill_timestamp: alert + Duration::minutes(i64::from(wait)),
                wait_time_minutes: wait,
                units_refilled: rng.gen_range(10..50),
            }
        })
        .collect();

    // loss = hours out of stock × units/hour × unit price
    let revenue_records = skus
        .iter()
        .map(|sku| {
            let oos_hours: f64 = rng.gen_range(1.0..8.0);
            let units_per_hour: f64 = rng.gen_range(5.0..15.0);
            let unit_price: f64 = rng.gen_range(2.5..25.0);
            RevenueRecord {
                sku: sku.clone(),
                oos_duration_hours: round2(oos_hours),
                potential_revenue_lost: round2(oos_hours * units_per_hour * unit_price),
            }
        })
        .collect();

    let errors = PlanogramErrorType::errors();
    let mut compliance_records = Vec::with_capacity(SHELVES.len() * SLOTS_PER_SHELF as usize);
    for shelf in SHELVES {
        let row = shelf
            .chars()
            .last()
            .and_then(|c| c.to_digit(10))
            .unwrap_or_default();
        for slot in 1..=SLOTS_PER_SHELF {
            let is_compliant = rng.gen_bool(COMPLIANCE_PROBABILITY);
            let error_type = if is_compliant {
                PlanogramErrorType::None
            } else {
                errors[rng.gen_range(0..errors.len())]
            };
            compliance_records.push(ComplianceRecord {
                shelf_id: shelf.to_string(),
                slot_id: slot,
                is_compliant,
                error_type,
                x_coord: i64::from(slot),
                y_coord: i64::from(row),
            });
        }
    }

    Snapshot::new(restock_events, revenue_records, compliance_records)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create '{}'", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::SnapshotSource;
    use chrono::NaiveDate;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 15)
            .unwrap()
            .and_hms_micro_opt(14, 45, 10, 123_456)
            .unwrap()
    }

    #[test]
    fn test_generated_records_satisfy_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        let snapshot = generate_snapshot(&mut rng, DEFAULT_VELOCITY_ROWS, fixed_now());

        assert_eq!(snapshot.counts(), (200, 20, 40));
        assert!(snapshot.restock_events().iter().all(|r| r.validate().is_ok()));
        assert!(snapshot.revenue_records().iter().all(|r| r.validate().is_ok()));
        assert!(snapshot.compliance_records().iter().all(|r| r.validate().is_ok()));
        assert!(snapshot
            .restock_events()
            .iter()
            .all(|r| (5..120).contains(&r.wait_time_minutes) && (10..50).contains(&r.units_refilled)));
        assert!(snapshot
            .compliance_records()
            .iter()
            .all(|r| (1..=10).contains(&r.x_coord) && (1..=2).contains(&r.y_coord)));
    }

    #[test]
    fn test_same_seed_same_snapshot() {
        let a = generate_snapshot(&mut StdRng::seed_from_u64(99), 50, fixed_now());
        let b = generate_snapshot(&mut StdRng::seed_from_u64(99), 50, fixed_now());
        assert_eq!(a, b);
    }

    #[test]
    fn test_execute_writes_loadable_files() {
        let dir = std::env::temp_dir().join(format!("smartshelf-u510-{}", std::process::id()));
        let target = CsvSnapshotSource::new(
            dir.join("product_velocity.csv"),
            dir.join("lost_revenue.csv"),
            dir.join("planogram_compliance.csv"),
        );
        let executor = SampleDataExecutor::new(target.clone());

        let response = executor
            .execute(&GenerateSampleDataRequest {
                seed: Some(3),
                velocity_rows: Some(25),
            })
            .unwrap();

        assert_eq!(response.velocity_rows, 25);
        assert_eq!(response.files.len(), 3);

        let loaded = target.load().unwrap();
        assert_eq!(loaded.counts(), (25, 20, 40));
        assert!(loaded.restock_events().iter().all(|r| r.validate().is_ok()));
        assert!(loaded.compliance_records().iter().all(|r| r.validate().is_ok()));
        std::fs::remove_dir_all(&dir).ok();
    }
}
