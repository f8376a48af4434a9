//! # Checkout
//!
//! Commits the open cart into an immutable [`Sale`].
//!
//! ## Commit Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       commit(cart, dataset, clock)                      │
//! │                                                                         │
//! │  cart empty? ──yes──► None (nothing changes)                            │
//! │      │ no                                                               │
//! │      ▼                                                                  │
//! │  (a) totals = cart.totals(rate)                                         │
//! │  (b) id = clock millis (bumped past the last sale id if needed)         │
//! │  (c) items = snapshot of every cart line                                │
//! │  (d) product.stock -= line.quantity, once per line                      │
//! │  (e) dataset.sales.push(sale)                                           │
//! │  (h) cart.clear()                                                       │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Some(sale) ──► caller persists the dataset (f) and prints (g)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persistence is not part of this function; till-core does no I/O. The
//! register session saves the dataset right after a successful commit and
//! keeps the in-memory result even when that save fails.

use chrono::{DateTime, Utc};

use crate::cart::Cart;
use crate::clock::Clock;
use crate::types::{Dataset, Sale, SaleId, SaleItem, TaxRate};

/// Commits `cart` into `dataset`.
///
/// Returns `None` for an empty cart. The stock decrement is unconditional:
/// while the cart was open every line stayed within stock, so with a single
/// writer it cannot drive stock negative. Lines whose product has since left
/// the catalog are still recorded in the sale but decrement nothing.
pub fn commit(
    cart: &mut Cart,
    dataset: &mut Dataset,
    clock: &dyn Clock,
    tax_rate: TaxRate,
) -> Option<Sale> {
    if cart.is_empty() {
        return None;
    }

    let totals = cart.totals(tax_rate);
    let now = clock.now();

    let sale = Sale {
        id: mint_sale_id(now, dataset.last_sale_id()),
        date: now,
        subtotal: totals.subtotal,
        tax: totals.tax,
        total: totals.total,
        items: cart
            .lines()
            .iter()
            .map(|line| SaleItem {
                id: line.id,
                name: line.name.clone(),
                price: line.price,
                quantity: line.quantity,
            })
            .collect(),
    };

    for item in &sale.items {
        if let Some(product) = dataset.product_mut(item.id) {
            product.stock -= item.quantity;
        }
    }

    dataset.sales.push(sale.clone());
    cart.clear();

    Some(sale)
}

/// Derives a sale id from the commit instant.
///
/// Milliseconds since the epoch, bumped to `last + 1` when two commits land
/// in the same millisecond or the clock stepped backwards.
pub fn mint_sale_id(now: DateTime<Utc>, last: Option<SaleId>) -> SaleId {
    let millis = now.timestamp_millis();
    match last {
        Some(SaleId(last)) if millis <= last => SaleId(last + 1),
        _ => SaleId(millis),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
