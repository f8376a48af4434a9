//! # Catalog Store
//!
//! Loads the dataset at startup and flushes it after every change.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CatalogStore::open                                │
//! │                                                                         │
//! │  backend.load()                                                        │
//! │      │                                                                  │
//! │      ├── Ok(dataset) ──► warn! on rule breaks, keep ─┐                  │
//! │      │                                               │                  │
//! │      └── Err(any) ──► warn! ──► Dataset::empty()     │                  │
//! │                            └──► save (self-heal)     │                  │
//! │                                      │               │                  │
//! │                                      ▼               ▼                  │
//! │                            inventory empty && seeding enabled?          │
//! │                                      │ yes                              │
//! │                                      ▼                                  │
//! │                            install default catalog ──► save             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing on this path returns an error: a register always starts. Only a
//! document that cannot be read or parsed is replaced; a parsed one is kept
//! even when it breaks catalog rules, so recorded sales are never discarded.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use till_core::catalog::default_catalog;
use till_core::validation::validate_dataset;
use till_core::Dataset;

use crate::backend::PersistenceBackend;
use crate::error::StoreResult;

/// Front door to the persistence backend.
pub struct CatalogStore {
    backend: Arc<dyn PersistenceBackend>,
    save_lock: Mutex<()>,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("resource", &self.backend.resource())
            .finish()
    }
}

impl CatalogStore {
    /// Creates a store over `backend`.
    pub fn new(backend: Arc<dyn PersistenceBackend>) -> Self {
        CatalogStore {
            backend,
            save_lock: Mutex::new(()),
        }
    }

    /// Name of the backing resource.
    pub fn resource(&self) -> &str {
        self.backend.resource()
    }

    /// Loads the dataset, self-healing and optionally seeding it.
    pub async fn open(&self, seed_on_empty: bool) -> Dataset {
        let mut dataset = self.load_or_heal().await;

        if seed_on_empty && Self::seed_if_empty(&mut dataset) {
            info!(
                resource = %self.resource(),
                products = dataset.inventory.len(),
                "Installed default catalog"
            );
            // Failure is already logged by save; the seeded catalog stays in memory
            let _ = self.save(&dataset).await;
        }

        dataset
    }

    /// Loads the dataset. On a load failure, substitutes an empty dataset
    /// and immediately tries to persist it so the backend converges to a
    /// known good state.
    ///
    /// A loaded dataset that breaks catalog rules (negative stock, for
    /// instance) is logged and kept as is.
    pub async fn load_or_heal(&self) -> Dataset {
        match self.backend.load().await {
            Ok(dataset) => {
                if let Err(e) = validate_dataset(&dataset) {
                    warn!(resource = %self.resource(), error = %e, "Dataset breaks catalog rules, keeping it");
                }
                debug!(
                    resource = %self.resource(),
                    products = dataset.inventory.len(),
                    sales = dataset.sales.len(),
                    "Dataset opened"
                );
                dataset
            }
            Err(e) => {
                warn!(resource = %self.resource(), error = %e, "Failed to load dataset, starting empty");
                let dataset = Dataset::empty();
                let _ = self.save(&dataset).await;
                dataset
            }
        }
    }

    /// Installs the default catalog when the inventory is empty.
    ///
    /// Returns whether anything was installed. Does not persist.
    pub fn seed_if_empty(dataset: &mut Dataset) -> bool {
        if !dataset.inventory.is_empty() {
            return false;
        }
        dataset.inventory = default_catalog();
        true
    }

    /// Persists the full dataset.
    ///
    /// Best effort: a failure is logged and returned, never retried. Saves
    /// are serialized so two writes are never in flight at once.
    pub async fn save(&self, dataset: &Dataset) -> StoreResult<()> {
        let _guard = self.save_lock.lock().await;

        match self.backend.save(dataset).await {
            Ok(()) => {
                debug!(resource = %self.resource(), sales = dataset.sales.len(), "Dataset persisted");
                Ok(())
            }
            Err(e) => {
                warn!(resource = %self.resource(), error = %e, "Failed to save dataset");
                Err(e)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{JsonFileBackend, MemoryBackend};
    use till_core::{Money, Product, ProductId, SaleId};

    #[tokio::test]
    async fn test_empty_catalog_is_seeded() {
        let backend = Arc::new(MemoryBackend::with_dataset(Dataset::empty()));
        let store = CatalogStore::new(backend.clone());

        let dataset = store.open(true).await;

        assert_eq!(dataset.inventory.len(), 6);
        assert_eq!(dataset.product(ProductId(101)).unwrap().stock, 15);
        assert_eq!(backend.stored().unwrap().inventory.len(), 6);
    }

    #[tokio::test]
    async fn test_existing_catalog_is_kept() {
        let existing = Dataset {
            inventory: vec![Product::new(7, "Peine", Money::from_cents(350), 4)],
            sales: Vec::new(),
        };
        let backend = Arc::new(MemoryBackend::with_dataset(existing.clone()));
        let store = CatalogStore::new(backend.clone());

        let dataset = store.open(true).await;

        assert_eq!(dataset, existing);
        assert_eq!(backend.save_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_load_self_heals_then_seeds() {
        let backend = Arc::new(MemoryBackend::new());
        let store = CatalogStore::new(backend.clone());

        let dataset = store.open(true).await;

        // One self-heal save of the empty dataset, one save of the seed
        assert_eq!(backend.save_count(), 2);
        assert_eq!(dataset.inventory.len(), 6);
        assert_eq!(backend.stored().unwrap(), dataset);
    }

    #[tokio::test]
    async fn test_failed_load_without_seeding_persists_empty() {
        let backend = Arc::new(MemoryBackend::new());
        let store = CatalogStore::new(backend.clone());

        let dataset = store.open(false).await;

        assert_eq!(dataset, Dataset::empty());
        assert_eq!(backend.stored(), Some(Dataset::empty()));
        assert_eq!(backend.save_count(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_backend_still_opens() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set_fail_loads(true);
        backend.set_fail_saves(true);
        let store = CatalogStore::new(backend.clone());

        let dataset = store.open(true).await;

        assert_eq!(dataset.inventory.len(), 6);
        assert_eq!(backend.save_count(), 0);
    }

    #[tokio::test]
    async fn test_save_failure_is_returned() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set_fail_saves(true);
        let store = CatalogStore::new(backend);

        assert!(store.save(&Dataset::empty()).await.is_err());
    }

    #[tokio::test]
    async fn test_rule_breaking_file_keeps_sales() {
        let path = std::env::temp_dir().join(format!("till-test-{}.json", uuid::Uuid::new_v4()));
        let document = r#"{
            "inventory": [{ "id": 102, "name": "Gel Fijador 250ml", "price": 8.5, "stock": -1 }],
            "sales": [{ "id": 1700000000000, "date": "2023-11-14T22:13:20Z",
                        "subtotal": 17.0, "tax": 3.06, "total": 20.06,
                        "items": [{ "id": 102, "name": "Gel Fijador 250ml", "price": 8.5, "quantity": 2 }] }]
        }"#;
        std::fs::write(&path, document).unwrap();
        let store = CatalogStore::new(Arc::new(JsonFileBackend::new(&path)));

        let dataset = store.open(true).await;

        assert_eq!(dataset.sales.len(), 1);
        assert_eq!(dataset.sales[0].id, SaleId(1_700_000_000_000));
        assert_eq!(dataset.product(ProductId(102)).unwrap().stock, -1);

        // Nothing was written over the document
        assert_eq!(std::fs::read_to_string(&path).unwrap(), document);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_unparseable_file_is_replaced() {
        let path = std::env::temp_dir().join(format!("till-test-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, "not json").unwrap();
        let backend = JsonFileBackend::new(&path);
        let store = CatalogStore::new(Arc::new(backend.clone()));

        let dataset = store.open(true).await;

        assert_eq!(dataset.inventory.len(), 6);
        assert_eq!(backend.load().await.unwrap(), dataset);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_seed_if_empty() {
        let mut dataset = Dataset::empty();
        assert!(CatalogStore::seed_if_empty(&mut dataset));
        assert!(!CatalogStore::seed_if_empty(&mut dataset));
        assert_eq!(dataset.inventory.len(), 6);
    }
}
