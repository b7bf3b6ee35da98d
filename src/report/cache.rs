use thiserror::Error;
use tracing::{debug, error, warn};

use super::model::CachedSnapshot;
use super::storage::{Storage, StorageError};

/// Fixed storage key holding the single report snapshot.
pub const CACHE_KEY: &str = "hr_onboarding_report_data";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("report snapshot is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Stores at most one [`CachedSnapshot`]. Expiry is the caller's business.
pub struct ReportCache {
    storage: Box<dyn Storage>,
}

impl ReportCache {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// Replaces any stored snapshot. Failures are logged and dropped.
    pub fn put(&mut self, snapshot: &CachedSnapshot) {
        if let Err(err) = self.try_put(snapshot) {
            error!(%err, "error saving report snapshot, continuing without persistence");
        }
    }

    pub fn try_put(&mut self, snapshot: &CachedSnapshot) -> Result<(), CacheError> {
        let encoded = serde_json::to_string(snapshot)?;
        self.storage.set_item(CACHE_KEY, &encoded)?;
        debug!(bytes = encoded.len(), "report snapshot saved");
        Ok(())
    }

    /// Returns the stored snapshot, if a readable one exists.
    ///
    /// A value that fails to decode is deleted and reported as absent.
    pub fn get(&mut self) -> Option<CachedSnapshot> {
        match self.try_get() {
            Ok(snapshot) => snapshot,
            Err(CacheError::Corrupt(err)) => {
                warn!(%err, "discarding corrupt report snapshot");
                self.delete();
                None
            }
            Err(err) => {
                error!(%err, "error reading report snapshot");
                None
            }
        }
    }

    fn try_get(&self) -> Result<Option<CachedSnapshot>, CacheError> {
        match self.storage.get_item(CACHE_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn delete(&mut self) {
        if let Err(err) = self.storage.remove_item(CACHE_KEY) {
            error!(%err, "error removing report snapshot");
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::report::model::{DepartmentRef, ReportPayload, StatMap};
    use crate::report::storage::MemoryStorage;

    /// Memory storage that can be inspected after it is moved into a cache.
    #[derive(Clone, Default)]
    pub(crate) struct SharedStorage {
        pub(crate) inner: Rc<RefCell<MemoryStorage>>,
        pub(crate) fail_writes: bool,
    }

    impl SharedStorage {
        pub(crate) fn raw(&self) -> Option<String> {
            self.inner.borrow().get_item(CACHE_KEY).expect("memory read")
        }

        pub(crate) fn seed(&self, raw: &str) {
            self.inner
                .borrow_mut()
                .set_item(CACHE_KEY, raw)
                .expect("memory write");
        }
    }

    impl Storage for SharedStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.borrow().get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    needed: value.len(),
                    quota: 0,
                });
            }
            self.inner.borrow_mut().set_item(key, value)
        }

        fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
            self.inner.borrow_mut().remove_item(key)
        }
    }

    fn snapshot(timestamp: i64) -> CachedSnapshot {
        CachedSnapshot {
            report_data: ReportPayload {
                onboarding_stats: Some(StatMap::from_iter([("Approved", 3), ("Pending", 1)])),
                offboarding_employees: Some(Vec::new()),
                ..ReportPayload::default()
            },
            date_from: "2025-01-01".into(),
            date_to: "2025-06-30".into(),
            departments: vec![DepartmentRef("Sales".into())],
            timestamp,
        }
    }

    #[test]
    fn put_then_get_returns_the_same_snapshot() {
        let mut cache = ReportCache::new(MemoryStorage::new());
        let stored = snapshot(1_700_000_000_000);

        cache.put(&stored);

        assert_eq!(cache.get(), Some(stored));
    }

    #[test]
    fn put_replaces_the_previous_snapshot_in_full() {
        let storage = SharedStorage::default();
        let mut cache = ReportCache::new(storage.clone());

        cache.put(&snapshot(1));
        let replacement = CachedSnapshot {
            timestamp: 2,
            ..CachedSnapshot::default()
        };
        cache.put(&replacement);

        assert_eq!(cache.get(), Some(replacement));
        assert!(!storage.raw().expect("stored").contains("Approved"));
    }

    #[test]
    fn corrupt_entry_is_deleted_and_reported_absent() {
        let storage = SharedStorage::default();
        storage.seed("{not json");
        let mut cache = ReportCache::new(storage.clone());

        assert_eq!(cache.get(), None);
        assert_eq!(storage.raw(), None);
    }

    #[test]
    fn wrongly_typed_entry_counts_as_corrupt() {
        let storage = SharedStorage::default();
        storage.seed(r#"{"timestamp": "yesterday"}"#);
        let mut cache = ReportCache::new(storage.clone());

        assert_eq!(cache.get(), None);
        assert_eq!(storage.raw(), None);
    }

    #[test]
    fn failed_write_is_swallowed() {
        let storage = SharedStorage {
            fail_writes: true,
            ..SharedStorage::default()
        };
        let mut cache = ReportCache::new(storage.clone());

        cache.put(&snapshot(1));

        assert!(matches!(
            cache.try_put(&snapshot(1)),
            Err(CacheError::Storage(StorageError::QuotaExceeded { .. }))
        ));
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut cache = ReportCache::new(MemoryStorage::new());
        cache.put(&snapshot(1));

        cache.delete();
        cache.delete();

        assert_eq!(cache.get(), None);
    }
}
