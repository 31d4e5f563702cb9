use serde::{Deserialize, Serialize};

/// Result of sample data generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSampleDataResponse {
    pub velocity_rows: usize,
    pub revenue_rows: usize,
    pub compliance_rows: usize,
    /// Files written, in velocity / revenue / compliance order
    pub files: Vec<String>,
}
