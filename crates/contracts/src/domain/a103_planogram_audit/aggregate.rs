use serde::{Deserialize, Serialize};

use crate::enums::PlanogramErrorType;
use crate::shared::csv_fields::deserialize_flag;

/// Planogram audit of a single shelf slot (aggregate a103)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    /// Shelf identifier (e.g. "A1-B2")
    pub shelf_id: String,

    /// 1-based slot number on the shelf
    pub slot_id: u32,

    #[serde(deserialize_with = "deserialize_flag")]
    pub is_compliant: bool,

    pub error_type: PlanogramErrorType,

    /// Physical grid position of the slot on the store floor
    pub x_coord: i64,
    pub y_coord: i64,
}

impl ComplianceRecord {
    pub fn validate(&self) -> Result<(), String> {
        if self.slot_id == 0 {
            return Err(format!("shelf {}: slot_id must be positive", self.shelf_id));
        }
        if self.is_compliant == self.error_type.is_error() {
            return Err(format!(
                "shelf {} slot {}: is_compliant={} contradicts error_type={}",
                self.shelf_id, self.slot_id, self.is_compliant, self.error_type
            ));
        }
        Ok(())
    }

    pub fn collection_name() -> &'static str {
        "planogram_audit"
    }
}
