//! # Cart
//!
//! The open transaction: line items being assembled before checkout.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operator Action        Cart Method                 Outcome             │
//! │  ───────────────        ───────────                 ───────             │
//! │                                                                         │
//! │  Pick product ────────► add_item(catalog, id) ────► new line / +1 /     │
//! │                                                     capped / no-op      │
//! │                                                                         │
//! │  [+] ─────────────────► adjust_quantity(Increase) ► +1 or capped        │
//! │                                                                         │
//! │  [-] ─────────────────► adjust_quantity(Decrease) ► -1, or removed      │
//! │                                                     when it hits zero   │
//! │                                                                         │
//! │  [x] ─────────────────► remove_item(id) ──────────► line gone           │
//! │                                                                         │
//! │  Cancel sale ─────────► clear() ──────────────────► empty               │
//! │                                                                         │
//! │  NOTE: nothing here returns an error. Unknown ids and increments past   │
//! │        stock are no-ops; the returned CartChange says which.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Product, ProductId, TaxRate};

// =============================================================================
// Cart Line
// =============================================================================

/// An item in the cart.
///
/// `name` and `price` are captured when the product is first added, so the
/// cart keeps showing the same values even if the catalog entry changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line refers to.
    pub id: ProductId,

    /// Product name at time of adding (frozen)
    pub name: String,

    /// Unit price at time of adding (frozen)
    pub price: Money,

    /// Always at least 1 and at most the product's stock.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a line with quantity 1 from a catalog product.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Mutation Outcomes
// =============================================================================

/// Direction of a quantity adjustment from the cart's [+] / [-] buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    Increase,
    Decrease,
}

/// What a cart mutation did.
///
/// Informational only. Every variant is a normal outcome; the no-op ones
/// exist so callers can log why the cart did not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was created with quantity 1.
    Added(ProductId),
    /// An existing line went up by one.
    Incremented { id: ProductId, quantity: i64 },
    /// An existing line went down by one.
    Decremented { id: ProductId, quantity: i64 },
    /// The line was deleted.
    Removed(ProductId),
    /// The line already holds every unit in stock.
    CappedAtStock { id: ProductId, stock: i64 },
    /// No catalog product has this id.
    UnknownProduct(ProductId),
    /// The product exists but has no stock.
    OutOfStock(ProductId),
    /// The cart has no line for this id.
    NotInCart(ProductId),
}

impl CartChange {
    /// True when the cart was left untouched.
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            CartChange::CappedAtStock { .. }
                | CartChange::UnknownProduct(_)
                | CartChange::OutOfStock(_)
                | CartChange::NotInCart(_)
        )
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id (adding the same product increases quantity)
/// - `1 <= quantity <= stock` for every line
/// - Decreasing a line to zero removes it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the line for a product, if any.
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    /// Adds one unit of a product, or increases its quantity if already present.
    ///
    /// ## Behavior
    /// - Unknown product: no-op
    /// - Product already in cart: +1 unless that would exceed stock
    /// - Product not in cart: new line with quantity 1, unless stock is 0
    pub fn add_item(&mut self, catalog: &[Product], id: ProductId) -> CartChange {
        let Some(product) = catalog.iter().find(|p| p.id == id) else {
            return CartChange::UnknownProduct(id);
        };

        if self.lines.iter().any(|l| l.id == id) {
            return self.increment(product);
        }

        if product.stock <= 0 {
            return CartChange::OutOfStock(id);
        }

        self.lines.push(CartLine::from_product(product));
        CartChange::Added(id)
    }

    /// Moves a line's quantity up or down by one.
    ///
    /// ## Behavior
    /// - Line absent: no-op
    /// - `Increase`: same stock cap as [`Cart::add_item`]
    /// - `Decrease`: -1, and the line is removed once it reaches zero
    pub fn adjust_quantity(
        &mut self,
        catalog: &[Product],
        id: ProductId,
        adjustment: Adjustment,
    ) -> CartChange {
        let Some(index) = self.lines.iter().position(|l| l.id == id) else {
            return CartChange::NotInCart(id);
        };

        match adjustment {
            Adjustment::Increase => match catalog.iter().find(|p| p.id == id) {
                Some(product) => self.increment(product),
                None => CartChange::UnknownProduct(id),
            },
            Adjustment::Decrease => {
                let line = &mut self.lines[index];
                line.quantity -= 1;
                if line.quantity <= 0 {
                    self.lines.remove(index);
                    CartChange::Removed(id)
                } else {
                    CartChange::Decremented {
                        id,
                        quantity: line.quantity,
                    }
                }
            }
        }
    }

    /// Removes a line by product id.
    pub fn remove_item(&mut self, id: ProductId) -> CartChange {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.id != id);

        if self.lines.len() == initial_len {
            CartChange::NotInCart(id)
        } else {
            CartChange::Removed(id)
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the number of lines in the cart.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Computes subtotal, tax and total from the current lines.
    ///
    /// Pure; recompute after every mutation rather than caching.
    pub fn totals(&self, tax_rate: TaxRate) -> CartTotals {
        CartTotals::compute(self.lines.iter().map(CartLine::line_total), tax_rate)
    }

    fn increment(&mut self, product: &Product) -> CartChange {
        let Some(line) = self.lines.iter_mut().find(|l| l.id == product.id) else {
            return CartChange::NotInCart(product.id);
        };

        if !product.can_sell(line.quantity + 1) {
            return CartChange::CappedAtStock {
                id: product.id,
                stock: product.stock,
            };
        }

        line.quantity += 1;
        CartChange::Incremented {
            id: product.id,
            quantity: line.quantity,
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Subtotal, tax and grand total of a set of lines.
///
/// `total == subtotal + tax` and `tax == subtotal × rate`, rounded to the cent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl CartTotals {
    /// Totals for the given line amounts.
    pub fn compute(line_totals: impl Iterator<Item = Money>, tax_rate: TaxRate) -> Self {
        let subtotal: Money = line_totals.sum();
        let tax = subtotal.calculate_tax(tax_rate);
        CartTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
