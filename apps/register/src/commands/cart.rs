//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│ In Cart  │────►│   Sale   │                         │
//! │  │  Cart    │     │          │     │ (sale.rs)│                         │
//! │  └──────────┘     └──────────┘     └──────────┘                         │
//! │       ▲                │                                                │
//! │       │           add / inc / dec / rm                                  │
//! │       │                │                                                │
//! │       └──── cancel ────┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use till_core::{Adjustment, CartChange, ProductId};

use crate::state::Session;

/// Prints the catalog grid.
///
/// ```text
///    ID  Product                      Price   Stock
///   101  Tijeras de Precisión        $45.99      15
/// ```
pub fn catalog(session: &Session) -> Vec<String> {
    let rows = session.catalog();
    if rows.is_empty() {
        return vec!["Catalog is empty".to_string()];
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!(
        "{:>5}  {:<26} {:>9} {:>7}",
        "ID", "Product", "Price", "Stock"
    ));
    for row in rows {
        lines.push(format!(
            "{:>5}  {:<26} {:>9} {:>7}",
            row.id.to_string(),
            row.name,
            row.price.to_string(),
            row.stock
        ));
    }
    lines
}

/// Adds one unit of a product.
pub fn add(session: &mut Session, id: ProductId) -> Vec<String> {
    let change = session.add_item(id);
    vec![describe(session, change), summary(session)]
}

/// Moves a cart line up or down by one.
pub fn adjust(session: &mut Session, id: ProductId, adjustment: Adjustment) -> Vec<String> {
    let change = session.adjust_quantity(id, adjustment);
    vec![describe(session, change), summary(session)]
}

/// Removes a cart line.
pub fn remove(session: &mut Session, id: ProductId) -> Vec<String> {
    let change = session.remove_item(id);
    vec![describe(session, change), summary(session)]
}

/// Prints the cart panel with totals.
pub fn show(session: &Session) -> Vec<String> {
    let view = session.cart();
    if view.is_empty {
        return vec!["Cart is empty".to_string()];
    }

    let mut lines = Vec::with_capacity(view.rows.len() + 4);
    for row in &view.rows {
        lines.push(format!(
            "{:>5}  {:<26} {:>9} x{:<4} {:>10}",
            row.id.to_string(),
            row.name,
            row.unit_price.to_string(),
            row.quantity,
            row.line_total.to_string()
        ));
    }
    lines.push(format!("{:>60}", format!("Subtotal: {}", view.totals.subtotal)));
    lines.push(format!(
        "{:>60}",
        format!("Tax ({}): {}", session.tax_rate(), view.totals.tax)
    ));
    lines.push(format!("{:>60}", format!("TOTAL: {}", view.totals.total)));
    lines
}

/// Empties the cart.
pub fn cancel(session: &mut Session) -> Vec<String> {
    match session.cancel() {
        0 => vec!["Cart is already empty".to_string()],
        n => vec![format!("Sale cancelled, {} line(s) cleared", n)],
    }
}

/// One line telling the operator what a cart mutation did.
pub fn describe(session: &Session, change: CartChange) -> String {
    let name = |id: ProductId| {
        session
            .dataset()
            .product(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("product {}", id))
    };

    match change {
        CartChange::Added(id) => format!("Added {}", name(id)),
        CartChange::Incremented { id, quantity } => format!("{} x{}", name(id), quantity),
        CartChange::Decremented { id, quantity } => format!("{} x{}", name(id), quantity),
        CartChange::Removed(id) => format!("Removed {}", name(id)),
        CartChange::CappedAtStock { id, stock } => {
            format!("Only {} of {} in stock", stock, name(id))
        }
        CartChange::UnknownProduct(id) => format!("No product with id {}", id),
        CartChange::OutOfStock(id) => format!("{} is out of stock", name(id)),
        CartChange::NotInCart(id) => format!("{} is not in the cart", name(id)),
    }
}

fn summary(session: &Session) -> String {
    let view = session.cart();
    let units: i64 = view.rows.iter().map(|r| r.quantity).sum();
    format!("Cart: {} item(s), total {}", units, view.totals.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use till_core::{Dataset, Money, Product, SystemClock};
    use till_store::{CatalogStore, MemoryBackend};

    async fn session_with(dataset: Dataset) -> Session {
        let store = CatalogStore::new(Arc::new(MemoryBackend::with_dataset(dataset)));
        Session::open(store, Box::new(SystemClock), false).await
    }

    async fn seeded() -> Session {
        let store = CatalogStore::new(Arc::new(MemoryBackend::with_dataset(Dataset::empty())));
        Session::open(store, Box::new(SystemClock), true).await
    }

    #[tokio::test]
    async fn test_catalog_lists_every_product() {
        let session = seeded().await;
        let lines = catalog(&session);

        assert_eq!(lines.len(), 7);
        assert!(lines[1].contains("Tijeras de Precisión"));
        assert!(lines[1].contains("$45.99"));
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let session = session_with(Dataset::empty()).await;
        assert_eq!(catalog(&session), vec!["Catalog is empty"]);
    }

    #[tokio::test]
    async fn test_add_reports_change_and_total() {
        let mut session = seeded().await;

        let lines = add(&mut session, ProductId(102));
        assert_eq!(lines[0], "Added Gel Fijador 250ml");

        let lines = adjust(&mut session, ProductId(102), Adjustment::Increase);
        assert_eq!(lines[0], "Gel Fijador 250ml x2");
        assert_eq!(lines[1], "Cart: 2 item(s), total $20.06");
    }

    #[tokio::test]
    async fn test_noop_messages() {
        let dataset = Dataset {
            inventory: vec![Product::new(9, "Brocha", Money::from_cents(500), 0)],
            sales: Vec::new(),
        };
        let mut session = session_with(dataset).await;

        assert_eq!(add(&mut session, ProductId(9))[0], "Brocha is out of stock");
        assert_eq!(add(&mut session, ProductId(77))[0], "No product with id 77");
        assert_eq!(
            remove(&mut session, ProductId(9))[0],
            "Brocha is not in the cart"
        );
    }

    #[tokio::test]
    async fn test_show_and_cancel() {
        let mut session = seeded().await;
        assert_eq!(show(&session), vec!["Cart is empty"]);

        add(&mut session, ProductId(102));
        add(&mut session, ProductId(102));
        let lines = show(&session);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].trim_start().starts_with("Subtotal: $17.00"));
        assert!(lines[2].trim_start().starts_with("Tax (18%): $3.06"));
        assert!(lines[3].trim_start().starts_with("TOTAL: $20.06"));

        assert_eq!(cancel(&mut session), vec!["Sale cancelled, 1 line(s) cleared"]);
        assert_eq!(cancel(&mut session), vec!["Cart is already empty"]);
    }
}
