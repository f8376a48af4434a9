//! # till-store: Persistence Layer for Till
//!
//! Loads and saves the [`Dataset`](till_core::Dataset), the one persisted
//! aggregate of the register (catalog plus sales history).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till Data Flow                                   │
//! │                                                                         │
//! │  Register session (checkout, startup)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────────────────────────┐  │   │
//! │  │   │ CatalogStore  │    │ PersistenceBackend                  │  │   │
//! │  │   │ (store.rs)    │───►│  JsonFileBackend  (backend/file.rs) │  │   │
//! │  │   │ open / save   │    │  MemoryBackend    (backend/memory)  │  │   │
//! │  │   └───────────────┘    └─────────────────────────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  data.json  { "inventory": [...], "sales": [...] }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use till_store::{CatalogStore, JsonFileBackend};
//!
//! let store = CatalogStore::new(Arc::new(JsonFileBackend::new("data.json")));
//! let mut dataset = store.open(true).await;
//! // ... mutate ...
//! if let Err(e) = store.save(&dataset).await {
//!     // already logged; in-memory state stays authoritative
//! }
//! ```

pub mod backend;
pub mod error;
pub mod store;

pub use backend::{JsonFileBackend, MemoryBackend, PersistenceBackend};
pub use error::{StoreError, StoreResult};
pub use store::CatalogStore;
