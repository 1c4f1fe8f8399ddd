//! Shared, periodically invalidated snapshot of a reference source.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant, SystemTime};

use crate::dataset::ReferenceDataset;
use crate::error::Result;
use crate::source::ReferenceSource;

#[derive(Debug)]
struct CacheEntry {
    dataset: Arc<ReferenceDataset>,
    loaded_at: Instant,
    stamp: Option<SystemTime>,
}

/// Keeps the last successfully loaded dataset for up to `ttl`.
///
/// The entry is also dropped as soon as the inner source reports a different
/// stamp, so an externally replaced roll file is picked up on the next load.
/// Load failures are never cached.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl<S: ReferenceSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entry: RwLock::new(None),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drops the cached snapshot.
    pub fn invalidate(&self) {
        *self.entry.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn fresh(&self, entry: &CacheEntry, stamp: Option<SystemTime>) -> bool {
        entry.loaded_at.elapsed() < self.ttl && entry.stamp == stamp
    }
}

impl<S: ReferenceSource> ReferenceSource for CachedSource<S> {
    fn load(&self) -> Result<Arc<ReferenceDataset>> {
        let stamp = self.inner.stamp();
        {
            let guard = self.entry.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = guard.as_ref().filter(|e| self.fresh(e, stamp)) {
                tracing::debug!(source = %self.inner.describe(), "using cached reference dataset");
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        let dataset = self.inner.load()?;
        let mut guard = self.entry.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(CacheEntry {
            dataset: Arc::clone(&dataset),
            loaded_at: Instant::now(),
            stamp,
        });
        Ok(dataset)
    }

    fn describe(&self) -> String {
        format!("{} (cached, ttl {}s)", self.inner.describe(), self.ttl.as_secs())
    }

    fn stamp(&self) -> Option<SystemTime> {
        self.inner.stamp()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::encoding::SourceEncoding;
    use crate::error::IngestError;

    struct CountingSource {
        loads: AtomicUsize,
        stamp: Mutex<Option<SystemTime>>,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                loads: AtomicUsize::new(0),
                stamp: Mutex::new(Some(SystemTime::UNIX_EPOCH)),
                fail,
            }
        }
    }

    impl ReferenceSource for CountingSource {
        fn load(&self) -> Result<Arc<ReferenceDataset>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(IngestError::Unavailable {
                    message: "offline".to_string(),
                });
            }
            let dataset = ReferenceDataset::from_text(
                "memory.csv",
                "Nom/Nom de Jeune Fille;Prenoms\nABA;MICHEL\n".to_string(),
                SourceEncoding::Utf8,
            )?;
            Ok(Arc::new(dataset))
        }

        fn describe(&self) -> String {
            "memory".to_string()
        }

        fn stamp(&self) -> Option<SystemTime> {
            *self.stamp.lock().unwrap()
        }
    }

    #[test]
    fn test_reuses_dataset_within_ttl() {
        let cache = CachedSource::new(CountingSource::new(false), Duration::from_secs(60));
        let first = cache.load().unwrap();
        let second = cache.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.inner().loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_ttl_always_reloads() {
        let cache = CachedSource::new(CountingSource::new(false), Duration::ZERO);
        cache.load().unwrap();
        cache.load().unwrap();
        assert_eq!(cache.inner().loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_stamp_change_invalidates() {
        let cache = CachedSource::new(CountingSource::new(false), Duration::from_secs(60));
        cache.load().unwrap();
        *cache.inner().stamp.lock().unwrap() =
            Some(SystemTime::UNIX_EPOCH + Duration::from_secs(1));
        cache.load().unwrap();
        assert_eq!(cache.inner().loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_explicit_invalidate() {
        let cache = CachedSource::new(CountingSource::new(false), Duration::from_secs(60));
        cache.load().unwrap();
        cache.invalidate();
        cache.load().unwrap();
        assert_eq!(cache.inner().loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let cache = CachedSource::new(CountingSource::new(true), Duration::from_secs(60));
        assert!(cache.load().is_err());
        assert!(cache.load().is_err());
        assert_eq!(cache.inner().loads.load(Ordering::SeqCst), 2);
    }
}
