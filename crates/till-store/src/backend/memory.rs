//! In-process backend. Used by tests and by `--ephemeral` sessions.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use till_core::Dataset;

use super::PersistenceBackend;
use crate::error::{StoreError, StoreResult};

/// Holds the dataset in memory. Loads and saves can be made to fail to
/// exercise the recovery paths.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    stored: Mutex<Option<Dataset>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryBackend {
    /// An empty backend; the first load fails as not found.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend already holding `dataset`.
    pub fn with_dataset(dataset: Dataset) -> Self {
        MemoryBackend {
            stored: Mutex::new(Some(dataset)),
            ..Self::default()
        }
    }

    /// Makes every subsequent load fail (or succeed again).
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent save fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// The last successfully saved (or initial) dataset.
    pub fn stored(&self) -> Option<Dataset> {
        self.stored
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PersistenceBackend for MemoryBackend {
    fn resource(&self) -> &str {
        "memory"
    }

    async fn load(&self) -> StoreResult<Dataset> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("connection refused".into()));
        }

        self.stored
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| StoreError::NotFound {
                resource: self.resource().to_string(),
            })
    }

    async fn save(&self, dataset: &Dataset) -> StoreResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("connection refused".into()));
        }

        *self.stored.lock().unwrap_or_else(PoisonError::into_inner) = Some(dataset.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::catalog::default_catalog;

    #[tokio::test]
    async fn test_empty_backend_load_is_not_found() {
        let backend = MemoryBackend::new();
        assert!(matches!(
            backend.load().await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let backend = MemoryBackend::new();
        let dataset = Dataset {
            inventory: default_catalog(),
            sales: Vec::new(),
        };
        backend.save(&dataset).await.unwrap();

        assert_eq!(backend.load().await.unwrap(), dataset);
        assert_eq!(backend.save_count(), 1);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let backend = MemoryBackend::with_dataset(Dataset::empty());
        backend.set_fail_loads(true);
        backend.set_fail_saves(true);

        assert!(backend.load().await.is_err());
        assert!(backend.save(&Dataset::empty()).await.is_err());
        assert_eq!(backend.save_count(), 0);

        backend.set_fail_loads(false);
        assert!(backend.load().await.is_ok());
    }
}
