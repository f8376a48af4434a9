//! # Validation Module
//!
//! Dataset validation for Till.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Shape of the JSON document                                        │
//! │  └── Decimal → cents conversion                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Unique product ids / sale ids                                     │
//! │  └── Non-empty names, non-negative prices and stock                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart rules (cart.rs)                                         │
//! │  └── Quantities capped at stock, never errors                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A dataset that fails here is treated by the store as a malformed
//! payload and replaced by an empty one.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{Dataset, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name accepted.
pub const MAX_NAME_LEN: usize = 200;

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use till_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Champú Hidratante").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a single product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;

    if product.price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
            product_id: product.id,
        });
    }

    if product.stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
            product_id: product.id,
        });
    }

    Ok(())
}

/// Validates a whole dataset.
///
/// ## Rules
/// - Every product passes [`validate_product`]
/// - Product ids are unique
/// - Sale ids are unique
pub fn validate_dataset(dataset: &Dataset) -> ValidationResult<()> {
    let mut product_ids = HashSet::with_capacity(dataset.inventory.len());
    for product in &dataset.inventory {
        validate_product(product)?;
        if !product_ids.insert(product.id) {
            return Err(ValidationError::DuplicateProduct(product.id));
        }
    }

    let mut sale_ids = HashSet::with_capacity(dataset.sales.len());
    for sale in &dataset.sales {
        if !sale_ids.insert(sale.id) {
            return Err(ValidationError::DuplicateSale(sale.id));
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::money::Money;
    use crate::types::{ProductId, Sale, SaleId};
    use chrono::Utc;

    #[test]
    fn test_default_catalog_is_valid() {
        let dataset = Dataset {
            inventory: default_catalog(),
            sales: Vec::new(),
        };
        assert!(validate_dataset(&dataset).is_ok());
    }

    #[test]
    fn test_name_too_long() {
        let name = "A".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            validate_product_name(&name),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_negative_stock_rejected() {
        let product = Product::new(1, "Broken", Money::from_cents(100), -1);
        assert!(matches!(
            validate_product(&product),
            Err(ValidationError::Negative { product_id: ProductId(1), .. })
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let product = Product::new(1, "Broken", Money::from_cents(-100), 3);
        assert!(validate_product(&product).is_err());
    }

    #[test]
    fn test_duplicate_product_rejected() {
        let dataset = Dataset {
            inventory: vec![
                Product::new(101, "One", Money::from_cents(100), 1),
                Product::new(101, "Two", Money::from_cents(200), 2),
            ],
            sales: Vec::new(),
        };
        assert!(matches!(
            validate_dataset(&dataset),
            Err(ValidationError::DuplicateProduct(ProductId(101)))
        ));
    }

    #[test]
    fn test_duplicate_sale_rejected() {
        let sale = Sale {
            id: SaleId(1),
            date: Utc::now(),
            subtotal: Money::zero(),
            tax: Money::zero(),
            total: Money::zero(),
            items: Vec::new(),
        };
        let dataset = Dataset {
            inventory: Vec::new(),
            sales: vec![sale.clone(), sale],
        };
        assert!(matches!(
            validate_dataset(&dataset),
            Err(ValidationError::DuplicateSale(SaleId(1)))
        ));
    }
}
