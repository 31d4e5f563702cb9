use serde::{Deserialize, Serialize};

/// Request to write a synthetic snapshot into the configured data files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateSampleDataRequest {
    /// Fixed seed for reproducible output; random when absent
    pub seed: Option<u64>,
    /// Number of restock rows, 200 by default
    pub velocity_rows: Option<usize>,
}
