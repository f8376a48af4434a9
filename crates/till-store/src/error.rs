//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds resource context and categorization   │
//! │       │                                                                 │
//! │       ├──► load: never propagated; CatalogStore self-heals              │
//! │       │                                                                 │
//! │       └──► save: returned to the caller and logged, never retried       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The resource does not exist yet.
    ///
    /// ## When This Occurs
    /// - First run, before any dataset was saved
    /// - The data file was deleted
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The backend could not be reached or read/written.
    ///
    /// ## When This Occurs
    /// - File permissions issue
    /// - Disk full
    /// - Parent directory cannot be created
    #[error("I/O error on {resource}: {message}")]
    Io { resource: String, message: String },

    /// The payload is not a dataset document.
    #[error("Malformed dataset payload: {0}")]
    Malformed(String),

    /// The dataset could not be encoded for writing.
    #[error("Failed to encode dataset: {0}")]
    Encode(String),

    /// Backend-specific failure.
    #[error("Backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Wraps an I/O error with the resource it happened on.
    pub fn io(resource: impl Into<String>, err: std::io::Error) -> Self {
        let resource = resource.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound { resource }
        } else {
            StoreError::Io {
                resource,
                message: err.to_string(),
            }
        }
    }
}

/// Decoding errors are malformed payloads; encoding errors are reported
/// through [`StoreError::Encode`] at the call site.
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Malformed(err.to_string())
    }
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_io_error_is_categorized() {
        let err = StoreError::io(
            "data.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(err.to_string(), "data.json not found");

        let err = StoreError::io(
            "data.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_bad_json_is_malformed() {
        let err: StoreError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, StoreError::Malformed(_)));
    }
}
