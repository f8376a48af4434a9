//! # Persistence Backends
//!
//! The contract between the register and wherever the dataset lives.
//!
//! ## Backend Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    PersistenceBackend                                   │
//! │                                                                         │
//! │  CatalogStore                                                          │
//! │       │                                                                 │
//! │       │  backend.load()          backend.save(&dataset)                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────┐   ┌───────────────────────────┐          │
//! │  │  JsonFileBackend          │   │  MemoryBackend            │          │
//! │  │  data.json on disk        │   │  in-process, for tests    │          │
//! │  │  full replace per save    │   │  can be told to fail      │          │
//! │  └───────────────────────────┘   └───────────────────────────┘          │
//! │                                                                         │
//! │  • One fixed resource per backend                                      │
//! │  • load returns the whole Dataset, save writes the whole Dataset       │
//! │  • No partial or patch updates                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod file;
pub mod memory;

use async_trait::async_trait;
use till_core::Dataset;

use crate::error::StoreResult;

/// Default resource name of the dataset document.
pub const DEFAULT_RESOURCE: &str = "data.json";

/// Loads and stores the full dataset document.
#[async_trait]
pub trait PersistenceBackend: Send + Sync {
    /// Name of the resource this backend reads and writes.
    fn resource(&self) -> &str;

    /// Reads the persisted dataset.
    async fn load(&self) -> StoreResult<Dataset>;

    /// Replaces the persisted dataset with `dataset`.
    async fn save(&self, dataset: &Dataset) -> StoreResult<()>;
}

pub use file::JsonFileBackend;
pub use memory::MemoryBackend;
