use anyhow::{anyhow, Result};
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::Instant;

use super::snapshot::Snapshot;

/// Fingerprint of the data a snapshot was loaded from
///
/// Two identities compare equal only if the backing data is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceIdentity(Vec<String>);

impl SourceIdentity {
    pub fn new(parts: Vec<String>) -> Self {
        Self(parts)
    }
}

impl fmt::Display for SourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" | "))
    }
}

/// Where snapshots come from
pub trait SnapshotSource: Send + Sync {
    /// Current identity of the backing data; must be cheap compared to `load`
    fn identity(&self) -> Result<SourceIdentity>;

    fn load(&self) -> Result<Snapshot>;
}

struct CachedSnapshot {
    identity: SourceIdentity,
    snapshot: Arc<Snapshot>,
    loaded_at: Instant,
}

/// Memoizes the loaded snapshot keyed by source identity
///
/// Same identity returns the same `Arc`; a changed identity drops the cached
/// snapshot and loads a fresh one.
pub struct SnapshotCache<S: SnapshotSource> {
    source: S,
    slot: RwLock<Option<CachedSnapshot>>,
}

impl<S: SnapshotSource> SnapshotCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            slot: RwLock::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Return the snapshot for the current source identity, loading it if needed
    pub fn get(&self) -> Result<Arc<Snapshot>> {
        let identity = self.source.identity()?;

        {
            let slot = self
                .slot
                .read()
                .map_err(|_| anyhow!("snapshot cache lock poisoned"))?;
            if let Some(cached) = slot.as_ref() {
                if cached.identity == identity {
                    return Ok(cached.snapshot.clone());
                }
            }
        }

        let mut slot = self
            .slot
            .write()
            .map_err(|_| anyhow!("snapshot cache lock poisoned"))?;

        // another request may have reloaded while we waited for the write lock
        if let Some(cached) = slot.as_ref() {
            if cached.identity == identity {
                return Ok(cached.snapshot.clone());
            }
            tracing::info!(
                "Snapshot source changed after {:?}, reloading ({})",
                cached.loaded_at.elapsed(),
                identity
            );
        }

        let started = Instant::now();
        let snapshot = Arc::new(self.source.load()?);
        let (velocity, revenue, compliance) = snapshot.counts();
        tracing::info!(
            "Snapshot loaded in {}ms: {} restock, {} revenue, {} compliance records",
            started.elapsed().as_millis(),
            velocity,
            revenue,
            compliance
        );

        *slot = Some(CachedSnapshot {
            identity,
            snapshot: snapshot.clone(),
            loaded_at: Instant::now(),
        });

        Ok(snapshot)
    }

    /// Drop the cached snapshot so the next `get` reloads
    pub fn invalidate(&self) -> Result<()> {
        let mut slot = self
            .slot
            .write()
            .map_err(|_| anyhow!("snapshot cache lock poisoned"))?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a102_revenue_loss::RevenueRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeSource {
        version: Mutex<String>,
        loads: AtomicUsize,
    }

    impl FakeSource {
        fn new(version: &str) -> Self {
            Self {
                version: Mutex::new(version.to_string()),
                loads: AtomicUsize::new(0),
            }
        }

        fn set_version(&self, version: &str) {
            *self.version.lock().unwrap() = version.to_string();
        }

        fn loads(&self) -> usize {
            self.loads.load(Ordering::SeqCst)
        }
    }

    impl SnapshotSource for FakeSource {
        fn identity(&self) -> Result<SourceIdentity> {
            Ok(SourceIdentity::new(vec![self.version.lock().unwrap().clone()]))
        }

        fn load(&self) -> Result<Snapshot> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            let version = self.version.lock().unwrap().clone();
            Ok(Snapshot::new(
                vec![],
                vec![RevenueRecord {
                    sku: version,
                    oos_duration_hours: 1.0,
                    potential_revenue_lost: 10.0,
                }],
                vec![],
            ))
        }
    }

    struct FailingSource;

    impl SnapshotSource for FailingSource {
        fn identity(&self) -> Result<SourceIdentity> {
            Ok(SourceIdentity::new(vec!["v1".into()]))
        }

        fn load(&self) -> Result<Snapshot> {
            Err(anyhow!("disk on fire"))
        }
    }

    #[test]
    fn test_same_identity_returns_cached_snapshot() {
        let cache = SnapshotCache::new(FakeSource::new("v1"));

        let first = cache.get().unwrap();
        let second = cache.get().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.source().loads(), 1);
    }

    #[test]
    fn test_changed_identity_reloads() {
        let cache = SnapshotCache::new(FakeSource::new("v1"));
        let first = cache.get().unwrap();

        cache.source().set_version("v2");
        let second = cache.get().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.revenue_records()[0].sku, "v2");
        assert_eq!(cache.source().loads(), 2);

        // stable again after the reload
        let third = cache.get().unwrap();
        assert!(Arc::ptr_eq(&second, &third));
        assert_eq!(cache.source().loads(), 2);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let cache = SnapshotCache::new(FakeSource::new("v1"));
        cache.get().unwrap();
        cache.invalidate().unwrap();
        cache.get().unwrap();
        assert_eq!(cache.source().loads(), 2);
    }

    #[test]
    fn test_load_failure_is_not_cached() {
        let cache = SnapshotCache::new(FailingSource);
        assert!(cache.get().is_err());
        assert!(cache.get().is_err());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(SnapshotCache::new(FakeSource::new("v1")));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.get().unwrap())
            })
            .collect();
        let snapshots: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(cache.source().loads(), 1);
        assert!(snapshots.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
