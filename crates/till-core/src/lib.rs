//! # till-core: Pure Business Logic for Till
//!
//! This crate is the transaction engine of the register. It holds the cart
//! rules, totals arithmetic, checkout commit and receipt layout as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Operator commands (apps/register)               │   │
//! │  │       add / inc / dec / rm / cancel / pay / receipt             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌────────┐  │   │
//! │  │   │  types  │ │  money  │ │   cart   │ │checkout │ │receipt │  │   │
//! │  │   │ Product │ │  Money  │ │   Cart   │ │ commit  │ │Receipt │  │   │
//! │  │   │  Sale   │ │ TaxRate │ │ CartLine │ │ SaleId  │ │  rows  │  │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └─────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                till-store (Persistence Layer)                   │   │
//! │  │           load / self-heal / seed / save of the Dataset         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Dataset)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The open transaction and its stock-capped mutations
//! - [`checkout`] - Commits a cart into an immutable sale
//! - [`receipt`] - Display/print representation of a committed sale
//! - [`view`] - Catalog and cart view models
//! - [`catalog`] - Default seed catalog
//! - [`clock`] - Time source abstraction
//! - [`validation`] - Dataset validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{catalog, Cart, Dataset, ProductId, TAX_RATE};
//!
//! let mut dataset = Dataset::empty();
//! dataset.inventory = catalog::default_catalog();
//!
//! let mut cart = Cart::new();
//! cart.add_item(&dataset.inventory, ProductId(102));
//! cart.add_item(&dataset.inventory, ProductId(102));
//!
//! let totals = cart.totals(TAX_RATE);
//! assert_eq!(totals.subtotal.cents(), 1700);
//! assert_eq!(totals.tax.cents(), 306);
//! assert_eq!(totals.total.cents(), 2006);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod clock;
pub mod error;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Adjustment, Cart, CartChange, CartLine, CartTotals};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::Receipt;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Sales tax applied to every cart subtotal: 18%.
///
/// Uniform across the catalog, never configured per product.
pub const TAX_RATE: TaxRate = TaxRate::from_bps(1800);
