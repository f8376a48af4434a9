//! # Register Session
//!
//! Everything one register needs between two operator commands.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Session                                      │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌───────────────┐   │
//! │  │ CatalogStore │ │   Dataset    │ │     Cart     │ │ Clock + tax   │   │
//! │  │ (persist)    │ │ (catalog +   │ │ (open sale)  │ │               │   │
//! │  │              │ │  sales)      │ │              │ │               │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └───────────────┘   │
//! │                                                                         │
//! │  Commands borrow the session mutably, one at a time. Every mutation     │
//! │  finishes before the next command is read.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use till_core::checkout;
use till_core::view::{cart_view, catalog_view, CartView, CatalogRow};
use till_core::{
    Adjustment, Cart, CartChange, CartTotals, Clock, Dataset, ProductId, Sale, SaleId, TaxRate,
    TAX_RATE,
};
use till_store::{CatalogStore, StoreResult};

/// Result of a checkout.
#[derive(Debug)]
pub struct CheckoutOutcome {
    /// The committed sale.
    pub sale: Sale,
    /// Whether the dataset made it to the store.
    pub saved: StoreResult<()>,
}

impl CheckoutOutcome {
    /// True when the sale was persisted.
    pub fn is_persisted(&self) -> bool {
        self.saved.is_ok()
    }
}

/// One register's working state.
pub struct Session {
    store: CatalogStore,
    dataset: Dataset,
    cart: Cart,
    clock: Box<dyn Clock>,
    tax_rate: TaxRate,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("store", &self.store)
            .field("products", &self.dataset.inventory.len())
            .field("sales", &self.dataset.sales.len())
            .field("cart", &self.cart)
            .field("tax_rate", &self.tax_rate)
            .finish()
    }
}

impl Session {
    /// Opens the store and starts with an empty cart.
    ///
    /// Never fails: an unreadable store yields an empty (or seeded) catalog.
    pub async fn open(store: CatalogStore, clock: Box<dyn Clock>, seed_on_empty: bool) -> Self {
        let dataset = store.open(seed_on_empty).await;

        info!(
            resource = %store.resource(),
            products = dataset.inventory.len(),
            sales = dataset.sales.len(),
            "Register session opened"
        );

        Session {
            store,
            dataset,
            cart: Cart::new(),
            clock,
            tax_rate: TAX_RATE,
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds one unit of a catalog product to the cart.
    pub fn add_item(&mut self, id: ProductId) -> CartChange {
        let change = self.cart.add_item(&self.dataset.inventory, id);
        log_change(change);
        change
    }

    /// Moves a cart line up or down by one.
    pub fn adjust_quantity(&mut self, id: ProductId, adjustment: Adjustment) -> CartChange {
        let change = self
            .cart
            .adjust_quantity(&self.dataset.inventory, id, adjustment);
        log_change(change);
        change
    }

    /// Deletes a cart line.
    pub fn remove_item(&mut self, id: ProductId) -> CartChange {
        let change = self.cart.remove_item(id);
        log_change(change);
        change
    }

    /// Empties the cart without recording anything. Returns the number of
    /// lines dropped.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.cart.item_count();
        self.cart.clear();
        debug!(lines = dropped, "Cart cancelled");
        dropped
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Commits the cart and persists the dataset.
    ///
    /// Returns `None` for an empty cart. A failed save does not undo the
    /// commit: the sale and the stock decrement stay in memory and will be
    /// written by the next successful save.
    pub async fn checkout(&mut self) -> Option<CheckoutOutcome> {
        let sale = checkout::commit(
            &mut self.cart,
            &mut self.dataset,
            self.clock.as_ref(),
            self.tax_rate,
        )?;

        info!(
            sale_id = %sale.id,
            items = sale.items.len(),
            total = %sale.total,
            "Sale committed"
        );

        let saved = self.store.save(&self.dataset).await;
        Some(CheckoutOutcome { sale, saved })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Totals of the open cart.
    pub fn totals(&self) -> CartTotals {
        self.cart.totals(self.tax_rate)
    }

    /// The catalog grid.
    pub fn catalog(&self) -> Vec<CatalogRow> {
        catalog_view(&self.dataset)
    }

    /// The cart panel.
    pub fn cart(&self) -> CartView {
        cart_view(&self.cart, self.tax_rate)
    }

    /// Recorded sales, oldest first.
    pub fn sales(&self) -> &[Sale] {
        &self.dataset.sales
    }

    /// Looks up a recorded sale.
    pub fn find_sale(&self, id: SaleId) -> Option<&Sale> {
        self.dataset.sale(id)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }
}

fn log_change(change: CartChange) {
    if change.is_noop() {
        debug!(?change, "Cart unchanged");
    } else {
        debug!(?change, "Cart updated");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use till_core::{FixedClock, Money};
    use till_store::MemoryBackend;

    fn clock() -> Box<dyn Clock> {
        Box::new(FixedClock(
            Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap(),
        ))
    }

    async fn seeded_session() -> (Session, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::with_dataset(Dataset::empty()));
        let store = CatalogStore::new(backend.clone());
        (Session::open(store, clock(), true).await, backend)
    }

    fn stock(session: &Session, id: i64) -> i64 {
        session.dataset().product(ProductId(id)).unwrap().stock
    }

    #[tokio::test]
    async fn test_open_seeds_empty_catalog() {
        let (session, _) = seeded_session().await;

        assert_eq!(session.catalog().len(), 6);
        assert_eq!(stock(&session, 101), 15);
        assert!(session.cart().is_empty);
        assert!(!session.cart().can_checkout);
    }

    #[tokio::test]
    async fn test_add_caps_at_stock() {
        let (mut session, _) = seeded_session().await;

        for _ in 0..15 {
            assert!(!session.add_item(ProductId(101)).is_noop());
        }
        assert_eq!(
            session.add_item(ProductId(101)),
            CartChange::CappedAtStock {
                id: ProductId(101),
                stock: 15
            }
        );
        assert_eq!(session.cart().rows[0].quantity, 15);
    }

    #[tokio::test]
    async fn test_adjust_and_remove() {
        let (mut session, _) = seeded_session().await;

        session.add_item(ProductId(103));
        session.adjust_quantity(ProductId(103), Adjustment::Increase);
        assert_eq!(session.cart().rows[0].quantity, 2);

        session.adjust_quantity(ProductId(103), Adjustment::Decrease);
        assert_eq!(
            session.adjust_quantity(ProductId(103), Adjustment::Decrease),
            CartChange::Removed(ProductId(103))
        );
        assert!(session.cart().is_empty);

        assert_eq!(
            session.remove_item(ProductId(103)),
            CartChange::NotInCart(ProductId(103))
        );
    }

    #[tokio::test]
    async fn test_checkout_commits_and_saves() {
        let (mut session, backend) = seeded_session().await;
        let saves_before = backend.save_count();

        session.add_item(ProductId(102));
        session.add_item(ProductId(102));
        assert_eq!(session.totals().total, Money::from_cents(2006));

        let outcome = session.checkout().await.unwrap();

        assert!(outcome.is_persisted());
        assert_eq!(outcome.sale.subtotal, Money::from_cents(1700));
        assert_eq!(outcome.sale.tax, Money::from_cents(306));
        assert_eq!(outcome.sale.total, Money::from_cents(2006));
        assert_eq!(stock(&session, 102), 118);
        assert_eq!(session.sales().len(), 1);
        assert!(session.cart().is_empty);

        assert_eq!(backend.save_count(), saves_before + 1);
        let stored = backend.stored().unwrap();
        assert_eq!(stored.sales.len(), 1);
        assert_eq!(stored.product(ProductId(102)).unwrap().stock, 118);
    }

    #[tokio::test]
    async fn test_empty_checkout_is_noop() {
        let (mut session, backend) = seeded_session().await;
        let saves_before = backend.save_count();

        assert!(session.checkout().await.is_none());
        assert!(session.sales().is_empty());
        assert_eq!(backend.save_count(), saves_before);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_sale_in_memory() {
        let (mut session, backend) = seeded_session().await;
        backend.set_fail_saves(true);

        session.add_item(ProductId(105));
        let outcome = session.checkout().await.unwrap();

        assert!(!outcome.is_persisted());
        assert_eq!(session.sales().len(), 1);
        assert_eq!(stock(&session, 105), 29);
        assert!(backend.stored().unwrap().sales.is_empty());

        // The next successful save carries the earlier sale too
        backend.set_fail_saves(false);
        session.add_item(ProductId(105));
        let outcome = session.checkout().await.unwrap();
        assert!(outcome.is_persisted());
        assert_eq!(backend.stored().unwrap().sales.len(), 2);
    }

    #[tokio::test]
    async fn test_recorded_sale_is_not_affected_by_later_carts() {
        let (mut session, _) = seeded_session().await;

        session.add_item(ProductId(106));
        let sale = session.checkout().await.unwrap().sale;

        session.add_item(ProductId(106));
        session.adjust_quantity(ProductId(106), Adjustment::Increase);
        session.cancel();

        assert_eq!(session.find_sale(sale.id), Some(&sale));
        assert_eq!(session.find_sale(SaleId(1)), None);
    }

    #[tokio::test]
    async fn test_cancel_drops_lines_without_touching_stock() {
        let (mut session, _) = seeded_session().await;

        session.add_item(ProductId(101));
        session.add_item(ProductId(104));
        assert_eq!(session.cancel(), 2);
        assert!(session.cart().is_empty);
        assert_eq!(stock(&session, 101), 15);
        assert!(session.sales().is_empty());
    }
}
