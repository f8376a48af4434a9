//! # JSON File Backend
//!
//! Keeps the dataset as a single JSON document on disk.
//!
//! ## Write Path
//! ```text
//! save(&dataset)
//!      │
//!      ▼
//! serde_json::to_vec_pretty ──► data.json.<uuid>.tmp ──► rename ──► data.json
//! ```
//! The rename replaces the document in one step, so a crash mid-write leaves
//! the previous document intact instead of a truncated one.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use till_core::Dataset;

use super::PersistenceBackend;
use crate::error::{StoreError, StoreResult};

/// Dataset stored as a JSON file at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
    resource: String,
}

impl JsonFileBackend {
    /// Creates a backend for the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let resource = path.display().to_string();
        JsonFileBackend { path, resource }
    }

    /// Path of the dataset document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".{}.tmp", Uuid::new_v4()));
        self.path.with_file_name(name)
    }
}

/// Parses a dataset document.
///
/// Only the shape is checked here. Catalog rules are reported by
/// [`CatalogStore`](crate::CatalogStore) without rejecting the data.
pub fn decode(bytes: &[u8]) -> StoreResult<Dataset> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Encodes a dataset document.
pub fn encode(dataset: &Dataset) -> StoreResult<Vec<u8>> {
    serde_json::to_vec_pretty(dataset).map_err(|e| StoreError::Encode(e.to_string()))
}

#[async_trait]
impl PersistenceBackend for JsonFileBackend {
    fn resource(&self) -> &str {
        &self.resource
    }

    async fn load(&self) -> StoreResult<Dataset> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| StoreError::io(&self.resource, e))?;

        let dataset = decode(&bytes)?;
        debug!(
            resource = %self.resource,
            products = dataset.inventory.len(),
            sales = dataset.sales.len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    async fn save(&self, dataset: &Dataset) -> StoreResult<()> {
        let bytes = encode(dataset)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(&self.resource, e))?;
        }

        replace_file(&self.temp_path(), &self.path, &bytes)
            .await
            .map_err(|e| StoreError::io(&self.resource, e))?;

        debug!(resource = %self.resource, bytes = bytes.len(), "Dataset saved");
        Ok(())
    }
}

/// Writes `bytes` to `temp`, then renames it over `target`.
///
/// The temp file never outlives a failure.
async fn replace_file(temp: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let written = match tokio::fs::write(temp, bytes).await {
        Ok(()) => tokio::fs::rename(temp, target).await,
        Err(e) => Err(e),
    };

    if written.is_err() {
        let _ = tokio::fs::remove_file(temp).await;
    }
    written
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::catalog::default_catalog;
    use till_core::ProductId;

    fn temp_file() -> PathBuf {
        std::env::temp_dir().join(format!("till-test-{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let backend = JsonFileBackend::new(temp_file());
        let err = backend.load().await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let path = temp_file();
        let backend = JsonFileBackend::new(&path);
        let dataset = Dataset {
            inventory: default_catalog(),
            sales: Vec::new(),
        };

        backend.save(&dataset).await.unwrap();
        let loaded = backend.load().await.unwrap();
        assert_eq!(loaded, dataset);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"price\": 45.99"));
        assert!(text.contains("\"sales\": []"));

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_save_replaces_whole_document() {
        let path = temp_file();
        let backend = JsonFileBackend::new(&path);

        let mut dataset = Dataset {
            inventory: default_catalog(),
            sales: Vec::new(),
        };
        backend.save(&dataset).await.unwrap();

        dataset.inventory.retain(|p| p.id == ProductId(103));
        backend.save(&dataset).await.unwrap();

        let loaded = backend.load().await.unwrap();
        assert_eq!(loaded.inventory.len(), 1);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_save_creates_parent_directory() {
        let dir = std::env::temp_dir().join(format!("till-test-{}", Uuid::new_v4()));
        let backend = JsonFileBackend::new(dir.join("nested").join("data.json"));

        backend.save(&Dataset::empty()).await.unwrap();
        assert_eq!(backend.load().await.unwrap(), Dataset::empty());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_garbage_is_malformed() {
        let path = temp_file();
        std::fs::write(&path, "<html>502 Bad Gateway</html>").unwrap();

        let err = JsonFileBackend::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_)));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_decode_keeps_data_that_breaks_catalog_rules() {
        let json = br#"{"inventory":[
            {"id":1,"name":"A","price":1.0,"stock":-1},
            {"id":1,"name":"B","price":2.0,"stock":2}
        ],"sales":[]}"#;
        let dataset = decode(json).unwrap();
        assert_eq!(dataset.inventory.len(), 2);
        assert_eq!(dataset.inventory[0].stock, -1);
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        assert!(matches!(
            decode(br#"{"inventory":{"id":1}}"#),
            Err(StoreError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_rename_removes_temp_file() {
        let dir = std::env::temp_dir().join(format!("till-test-{}", Uuid::new_v4()));
        let target = dir.join("data.json");
        // A non-empty directory where the document should go makes the rename fail
        std::fs::create_dir_all(target.join("occupied")).unwrap();
        let temp = dir.join("data.json.tmp");

        assert!(replace_file(&temp, &target, b"{}").await.is_err());
        assert!(!temp.exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_document() {
        let dir = std::env::temp_dir().join(format!("till-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let target = dir.join("data.json");
        std::fs::write(&target, "old").unwrap();
        let temp = dir.join("missing").join("data.json.tmp");

        assert!(replace_file(&temp, &target, b"{}").await.is_err());
        assert!(!temp.exists());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "old");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_temp_path_sits_next_to_document() {
        let backend = JsonFileBackend::new("/var/lib/till/data.json");
        let temp = backend.temp_path();
        assert_eq!(temp.parent(), Some(Path::new("/var/lib/till")));
        let name = temp.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("data.json."));
        assert!(name.ends_with(".tmp"));
    }
}
