//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Dataset validation failures                    │
//! │                                                                         │
//! │  till-store errors (separate crate)                                    │
//! │  └── StoreError       - Persistence failures                           │
//! │                                                                         │
//! │  register errors (in app)                                              │
//! │  └── RegisterError    - Config / command / store failures              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → RegisterError        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutations never produce errors. Unknown ids and stock-capped
//! increments are no-ops reported through [`crate::CartChange`], so nothing
//! in here is raised by the cart or by checkout.

use thiserror::Error;

use crate::types::{ProductId, SaleId};

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A decimal amount could not be represented as money.
    ///
    /// ## When This Occurs
    /// - The dataset document carries `NaN`, infinity or an amount too
    ///   large to fit in cents
    #[error("Invalid money amount: {0}")]
    InvalidAmount(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Dataset validation errors.
///
/// Raised when a loaded dataset breaks the catalog invariants. The store
/// treats any of these as a malformed payload.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} of product {product_id} must not be negative")]
    Negative { field: String, product_id: ProductId },

    /// Two products share the same id.
    #[error("Duplicate product id {0}")]
    DuplicateProduct(ProductId),

    /// Two sales share the same id.
    #[error("Duplicate sale id {0}")]
    DuplicateSale(SaleId),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
