//! # Domain Types
//!
//! Core domain types used throughout Till.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │ Dataset  (the one persisted aggregate)                          │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────────────┐            ┌──────────────────────────┐    │   │
//! │  │  │ inventory       │            │ sales (append-only)      │    │   │
//! │  │  │  Product        │            │  Sale                    │    │   │
//! │  │  │  ─────────────  │            │  ──────────────────────  │    │   │
//! │  │  │  id             │            │  id (epoch millis)       │    │   │
//! │  │  │  name           │            │  date                    │    │   │
//! │  │  │  price          │            │  subtotal / tax / total  │    │   │
//! │  │  │  stock          │            │  items: [SaleItem]       │    │   │
//! │  │  └─────────────────┘            └──────────────────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │    TaxRate      │  bps (u32): 1800 = 18%                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `SaleItem` copies name, price and quantity out of the cart at commit
//! time. Later catalog edits never reach a recorded sale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::{self, Money};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 1800 bps = 18% and the tax on any
/// amount of cents stays an integer computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

/// Percentage label as printed on receipts: `18%`, `8.25%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Identifiers
// =============================================================================

/// Stable product identifier (`101`, `102`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

/// Honors width and alignment, so ids line up in tables.
impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Sale identifier: milliseconds since the Unix epoch at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(pub i64);

impl fmt::Display for SaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: ProductId,

    /// Display name shown to the operator and on the receipt.
    pub name: String,

    /// Unit price.
    #[serde(with = "money::decimal")]
    pub price: Money,

    /// Units on hand.
    pub stock: i64,
}

impl Product {
    /// Creates a product.
    pub fn new(id: i64, name: impl Into<String>, price: Money, stock: i64) -> Self {
        Product {
            id: ProductId(id),
            name: name.into(),
            price,
            stock,
        }
    }

    /// Checks if `quantity` units can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity <= self.stock
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line of a committed sale.
///
/// Frozen copy of the cart line at commit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    /// Product this line sold.
    pub id: ProductId,
    /// Product name at time of sale (frozen).
    pub name: String,
    /// Unit price at time of sale (frozen).
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Quantity sold.
    pub quantity: i64,
}

impl SaleItem {
    /// Line total before tax (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A committed sale. Immutable once appended to the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub date: DateTime<Utc>,
    #[serde(with = "money::decimal")]
    pub subtotal: Money,
    #[serde(with = "money::decimal")]
    pub tax: Money,
    #[serde(with = "money::decimal")]
    pub total: Money,
    pub items: Vec<SaleItem>,
}

impl Sale {
    /// Total number of units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// The persisted aggregate: catalog plus sales history.
///
/// Missing keys in the document read as empty sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub inventory: Vec<Product>,
    #[serde(default)]
    pub sales: Vec<Sale>,
}

impl Dataset {
    /// `{ inventory: [], sales: [] }`
    pub fn empty() -> Self {
        Dataset::default()
    }

    /// Looks up a product by id.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.inventory.iter().find(|p| p.id == id)
    }

    /// Mutable product lookup.
    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.inventory.iter_mut().find(|p| p.id == id)
    }

    /// Looks up a recorded sale by id.
    pub fn sale(&self, id: SaleId) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// Id of the most recently appended sale.
    pub fn last_sale_id(&self) -> Option<SaleId> {
        self.sales.last().map(|s| s.id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
