//! # Sale Commands
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    pay / checkout                                       │
//! │                                                                         │
//! │  session.checkout()                                                     │
//! │      │                                                                  │
//! │      ├── None ──────────► "Cart is empty"                               │
//! │      │                                                                  │
//! │      └── Some(outcome)                                                  │
//! │              │                                                          │
//! │              ├──► receipt (store name + Receipt::render)                │
//! │              │                                                          │
//! │              └──► saved? no ──► warning line, sale kept in memory       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Receipt dates are shown in the register's local time zone.

use chrono::{FixedOffset, Local, Offset};

use till_core::{Receipt, Sale, SaleId, TaxRate};

use crate::state::{RegisterConfig, Session};

/// Commits the cart and prints its receipt.
pub async fn checkout(session: &mut Session, config: &RegisterConfig) -> Vec<String> {
    let tax_rate = session.tax_rate();
    let Some(outcome) = session.checkout().await else {
        return vec!["Cart is empty, nothing to charge".to_string()];
    };

    let mut lines = render_receipt(&outcome.sale, config, tax_rate, local_offset());
    if let Err(e) = &outcome.saved {
        lines.push(format!(
            "Warning: sale #{} is recorded but was not saved ({})",
            outcome.sale.id, e
        ));
    }
    lines
}

/// Lists recorded sales, oldest first.
pub fn sales(session: &Session) -> Vec<String> {
    let sales = session.sales();
    if sales.is_empty() {
        return vec!["No sales recorded".to_string()];
    }

    let offset = local_offset();
    sales
        .iter()
        .map(|sale| {
            format!(
                "#{}  {}  {:>3} unit(s)  {:>10}",
                sale.id,
                sale.date.with_timezone(&offset).format("%d/%m/%Y %H:%M"),
                sale.total_quantity(),
                sale.total.to_string()
            )
        })
        .collect()
}

/// Reprints the receipt of a recorded sale.
pub fn receipt(session: &Session, config: &RegisterConfig, id: SaleId) -> Vec<String> {
    match session.find_sale(id) {
        Some(sale) => render_receipt(sale, config, session.tax_rate(), local_offset()),
        None => vec![format!("No sale #{}", id)],
    }
}

/// Store name banner followed by the receipt body.
pub fn render_receipt(
    sale: &Sale,
    config: &RegisterConfig,
    tax_rate: TaxRate,
    offset: FixedOffset,
) -> Vec<String> {
    let width = config.paper_width;
    let banner = format!("{:^width$}", config.store_name);
    let mut lines = vec![banner.trim_end().to_string()];
    lines.extend(Receipt::from_sale(sale, tax_rate, offset).render(width));
    lines
}

fn local_offset() -> FixedOffset {
    Local::now().offset().fix()
}
