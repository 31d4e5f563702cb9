pub mod csv_source;
pub mod snapshot;
pub mod snapshot_cache;

pub use csv_source::CsvSnapshotSource;
pub use snapshot::Snapshot;
pub use snapshot_cache::{SnapshotCache, SnapshotSource, SourceIdentity};
