//! View models for the catalog grid and the cart panel.
//!
//! The engine never formats anything itself; whatever front end drives the
//! register renders these.

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartTotals};
use crate::money::Money;
use crate::types::{Dataset, ProductId, TaxRate};

/// One product card in the catalog grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub id: ProductId,
    pub name: String,
    pub stock: i64,
    pub price: Money,
}

/// One line of the cart panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartRow {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub line_total: Money,
}

/// The cart panel: lines, totals and whether checkout is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartView {
    pub rows: Vec<CartRow>,
    pub totals: CartTotals,
    pub is_empty: bool,
    /// Checkout is disabled for an empty cart.
    pub can_checkout: bool,
}

/// Catalog rows in catalog order.
pub fn catalog_view(dataset: &Dataset) -> Vec<CatalogRow> {
    dataset
        .inventory
        .iter()
        .map(|p| CatalogRow {
            id: p.id,
            name: p.name.clone(),
            stock: p.stock,
            price: p.price,
        })
        .collect()
}

/// The cart panel for the current cart.
pub fn cart_view(cart: &Cart, tax_rate: TaxRate) -> CartView {
    let rows = cart
        .lines()
        .iter()
        .map(|l| CartRow {
            id: l.id,
            name: l.name.clone(),
            unit_price: l.price,
            quantity: l.quantity,
            line_total: l.line_total(),
        })
        .collect();

    CartView {
        rows,
        totals: cart.totals(tax_rate),
        is_empty: cart.is_empty(),
        can_checkout: !cart.is_empty(),
    }
}
