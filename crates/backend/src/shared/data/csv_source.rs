//! CSV snapshot source.
//!
//! Reads the three dashboard files:
//!   product_velocity.csv       sku, category, alert_timestamp, refill_timestamp, wait_time_mins, units_refilled
//!   lost_revenue.csv           sku, oos_duration_hours, potential_revenue_lost
//!   planogram_compliance.csv   shelf_id, slot_id, is_compliant, error_type, x_coord, y_coord

use anyhow::{Context, Result};
use contracts::domain::a101_restock_event::RestockEvent;
use contracts::domain::a102_revenue_loss::RevenueRecord;
use contracts::domain::a103_planogram_audit::ComplianceRecord;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use super::snapshot::Snapshot;
use super::snapshot_cache::{SnapshotSource, SourceIdentity};
use crate::shared::config::{resolve_data_path, PathsConfig};

#[derive(Debug, Clone)]
pub struct CsvSnapshotSource {
    pub velocity_path: PathBuf,
    pub revenue_path: PathBuf,
    pub compliance_path: PathBuf,
}

impl CsvSnapshotSource {
    pub fn new(
        velocity_path: impl Into<PathBuf>,
        revenue_path: impl Into<PathBuf>,
        compliance_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            velocity_path: velocity_path.into(),
            revenue_path: revenue_path.into(),
            compliance_path: compliance_path.into(),
        }
    }

    pub fn from_config(paths: &PathsConfig) -> Self {
        Self::new(
            resolve_data_path(&paths.velocity_data),
            resolve_data_path(&paths.revenue_data),
            resolve_data_path(&paths.compliance_data),
        )
    }

    pub fn paths(&self) -> [&Path; 3] {
        [
            self.velocity_path.as_path(),
            self.revenue_path.as_path(),
            self.compliance_path.as_path(),
        ]
    }

    pub fn all_files_exist(&self) -> bool {
        self.paths().iter().all(|p| p.exists())
    }
}

impl SnapshotSource for CsvSnapshotSource {
    fn identity(&self) -> Result<SourceIdentity> {
        let mut parts = Vec::with_capacity(3);
        for path in self.paths() {
            let meta = std::fs::metadata(path)
                .with_context(|| format!("Failed to stat '{}'", path.display()))?;
            let modified = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_nanos())
                .unwrap_or_default();
            parts.push(format!("{}:{}:{}", path.display(), meta.len(), modified));
        }
        Ok(SourceIdentity::new(parts))
    }

    fn load(&self) -> Result<Snapshot> {
        let restock_events: Vec<RestockEvent> = read_records_file(&self.velocity_path)?;
        let revenue_records: Vec<RevenueRecord> = read_records_file(&self.revenue_path)?;
        let compliance_records: Vec<ComplianceRecord> = read_records_file(&self.compliance_path)?;
        Ok(Snapshot::new(
            restock_events,
            revenue_records,
            compliance_records,
        ))
    }
}

/// Deserialize every row of a CSV stream with headers
pub fn read_records<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        // +2: header line and 1-based numbering
        let record: T =
            result.with_context(|| format!("CSV parse error at line {}", line_num + 2))?;
        records.push(record);
    }
    Ok(records)
}

pub fn read_records_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open '{}'", path.display()))?;
    let records =
        read_records(file).with_context(|| format!("Failed to read '{}'", path.display()))?;
    tracing::debug!("Read {} rows from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::PlanogramErrorType;

    const VELOCITY_CSV: &str = "\
sku,category,alert_timestamp,refill_timestamp,wait_time_mins,units_refilled
SKU_001,Beverages,2026-01-05 10:00:00.000001,2026-01-05 10:25:00.000001,25,40
SKU_002, Snacks ,2026-01-06 22:10:00,2026-01-06 23:05:30,55,12
";

    const REVENUE_CSV: &str = "\
sku,oos_duration_hours,potential_revenue_lost
SKU_001,2.5,310.12
SKU_002,7.75,1204.9
";

    const COMPLIANCE_CSV: &str = "\
shelf_id,slot_id,is_compliant,error_type,x_coord,y_coord
A1-B1,1,1,None,1,1
A1-B1,2,0,Misplaced,2,1
";

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "smartshelf-csv-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_fixture(dir: &Path) -> CsvSnapshotSource {
        let source = CsvSnapshotSource::new(
            dir.join("product_velocity.csv"),
            dir.join("lost_revenue.csv"),
            dir.join("planogram_compliance.csv"),
        );
        std::fs::write(&source.velocity_path, VELOCITY_CSV).unwrap();
        std::fs::write(&source.revenue_path, REVENUE_CSV).unwrap();
        std::fs::write(&source.compliance_path, COMPLIANCE_CSV).unwrap();
        source
    }

    #[test]
    fn test_read_velocity_records_trims_fields() {
        let rows: Vec<RestockEvent> = read_records(VELOCITY_CSV.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].category, "Snacks");
        assert!(rows.iter().all(|r| r.validate().is_ok()));
    }

    #[test]
    fn test_read_records_reports_line_number() {
        let broken = "sku,oos_duration_hours,potential_revenue_lost\nSKU_1,1.0,5.0\nSKU_2,abc,5.0\n";
        let err = read_records::<RevenueRecord, _>(broken.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_load_snapshot_from_files() {
        let dir = scratch_dir("load");
        let source = write_fixture(&dir);

        let snapshot = source.load().unwrap();

        assert_eq!(snapshot.counts(), (2, 2, 2));
        assert_eq!(
            snapshot.compliance_records()[1].error_type,
            PlanogramErrorType::Misplaced
        );
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_identity_changes_when_file_changes() {
        let dir = scratch_dir("identity");
        let source = write_fixture(&dir);

        let before = source.identity().unwrap();
        assert_eq!(before, source.identity().unwrap());

        std::fs::write(
            &source.revenue_path,
            format!("{}SKU_003,1.0,99.5\n", REVENUE_CSV),
        )
        .unwrap();
        assert_ne!(before, source.identity().unwrap());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = scratch_dir("missing");
        let source = CsvSnapshotSource::new(
            dir.join("nope.csv"),
            dir.join("nope2.csv"),
            dir.join("nope3.csv"),
        );
        assert!(!source.all_files_exist());
        assert!(source.identity().is_err());
        assert!(source.load().is_err());
        std::fs::remove_dir_all(&dir).ok();
    }
}
