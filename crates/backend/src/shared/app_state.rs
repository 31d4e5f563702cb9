use std::sync::Arc;

use super::config::Config;
use super::data::{CsvSnapshotSource, SnapshotCache};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub snapshots: Arc<SnapshotCache<CsvSnapshotSource>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let source = CsvSnapshotSource::from_config(&config.paths);
        Self {
            config: Arc::new(config),
            snapshots: Arc::new(SnapshotCache::new(source)),
        }
    }
}
