//! # Receipt
//!
//! Pure transformation of a committed [`Sale`] into something to show or
//! print. No state, no side effects: the same sale, rate and offset always
//! give the same receipt.
//!
//! ## Layout (42 columns)
//! ```text
//!          Invoice #1709994600000
//!        Date: 09/03/2024, 14:30:00
//! ------------------------------------------
//! Product                     Qty      Total
//! Gel Fijador 250ml             2     $17.00
//! ------------------------------------------
//!                           Subtotal: $17.00
//!                           Tax (18%): $3.06
//!                              TOTAL: $20.06
//! ```

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;
use crate::types::{Sale, SaleId, TaxRate};

/// Paper width used by `Display`, in characters.
pub const DEFAULT_PAPER_WIDTH: usize = 42;

/// Narrowest layout `render` will produce.
const MIN_PAPER_WIDTH: usize = 24;

/// Date shown in the header, e.g. `09/03/2024, 14:30:00`.
const DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Receipt header: which sale and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptHeader {
    pub sale_id: SaleId,
    /// Sale date in the register's local offset.
    pub date: String,
}

/// One printed line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRow {
    pub name: String,
    pub quantity: i64,
    /// price × quantity
    pub amount: Money,
}

/// Totals block at the foot of the receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptSummary {
    pub subtotal: Money,
    /// `Tax (18%)`
    pub tax_label: String,
    pub tax: Money,
    pub total: Money,
}

/// Display/print representation of a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub header: ReceiptHeader,
    pub rows: Vec<ReceiptRow>,
    pub summary: ReceiptSummary,
}

impl Receipt {
    /// Builds the receipt for `sale`, showing its date at `offset`.
    pub fn from_sale(sale: &Sale, tax_rate: TaxRate, offset: FixedOffset) -> Self {
        Receipt {
            header: ReceiptHeader {
                sale_id: sale.id,
                date: sale.date.with_timezone(&offset).format(DATE_FORMAT).to_string(),
            },
            rows: sale
                .items
                .iter()
                .map(|item| ReceiptRow {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    amount: item.line_total(),
                })
                .collect(),
            summary: ReceiptSummary {
                subtotal: sale.subtotal,
                tax_label: format!("Tax ({})", tax_rate),
                tax: sale.tax,
                total: sale.total,
            },
        }
    }

    /// Lays the receipt out as fixed-width text lines.
    ///
    /// Columns follow a 60/15/25 split between product, quantity and amount.
    /// Names that do not fit are cut short.
    pub fn render(&self, width: usize) -> Vec<String> {
        let width = width.max(MIN_PAPER_WIDTH);
        let name_w = width * 60 / 100;
        let qty_w = width * 15 / 100;
        let amount_w = width - name_w - qty_w;
        let rule = "-".repeat(width);

        let mut lines = Vec::with_capacity(self.rows.len() + 8);
        lines.push(center(&format!("Invoice #{}", self.header.sale_id), width));
        lines.push(center(&format!("Date: {}", self.header.date), width));
        lines.push(rule.clone());
        lines.push(format!(
            "{:<name_w$}{:>qty_w$}{:>amount_w$}",
            "Product", "Qty", "Total"
        ));
        for row in &self.rows {
            lines.push(format!(
                "{:<name_w$}{:>qty_w$}{:>amount_w$}",
                truncate(&row.name, name_w.saturating_sub(1)),
                row.quantity,
                row.amount.to_string()
            ));
        }
        lines.push(rule);
        lines.push(format!(
            "{:>width$}",
            format!("Subtotal: {}", self.summary.subtotal)
        ));
        lines.push(format!(
            "{:>width$}",
            format!("{}: {}", self.summary.tax_label, self.summary.tax)
        ));
        lines.push(format!("{:>width$}", format!("TOTAL: {}", self.summary.total)));
        lines
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(DEFAULT_PAPER_WIDTH).join("\n"))
    }
}

fn center(text: &str, width: usize) -> String {
    format!("{:^width$}", text).trim_end().to_string()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProductId, SaleItem};
    use crate::TAX_RATE;
    use chrono::{TimeZone, Utc};

    fn sale() -> Sale {
        Sale {
            id: SaleId(1_709_994_600_000),
            date: Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 0).unwrap(),
            subtotal: Money::from_cents(6299),
            tax: Money::from_cents(1134),
            total: Money::from_cents(7433),
            items: vec![
                SaleItem {
                    id: ProductId(101),
                    name: "Tijeras de Precisión".to_string(),
                    price: Money::from_cents(4599),
                    quantity: 1,
                },
                SaleItem {
                    id: ProductId(102),
                    name: "Gel Fijador 250ml".to_string(),
                    price: Money::from_cents(850),
                    quantity: 2,
                },
            ],
        }
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_receipt_contents() {
        let receipt = Receipt::from_sale(&sale(), TAX_RATE, utc());

        assert_eq!(receipt.header.sale_id, SaleId(1_709_994_600_000));
        assert_eq!(receipt.header.date, "09/03/2024, 14:30:00");
        assert_eq!(receipt.rows.len(), 2);
        assert_eq!(receipt.rows[1].quantity, 2);
        assert_eq!(receipt.rows[1].amount.cents(), 1700);
        assert_eq!(receipt.summary.tax_label, "Tax (18%)");
        assert_eq!(receipt.summary.total.cents(), 7433);
    }

    #[test]
    fn test_date_is_localized_to_offset() {
        let madrid_winter = FixedOffset::east_opt(3600).unwrap();
        let receipt = Receipt::from_sale(&sale(), TAX_RATE, madrid_winter);
        assert_eq!(receipt.header.date, "09/03/2024, 15:30:00");
    }

    #[test]
    fn test_render_layout() {
        let lines = Receipt::from_sale(&sale(), TAX_RATE, utc()).render(42);

        assert_eq!(lines[0].trim(), "Invoice #1709994600000");
        assert_eq!(lines[1].trim(), "Date: 09/03/2024, 14:30:00");
        assert_eq!(lines[2], "-".repeat(42));

        let gel = &lines[5];
        assert_eq!(gel.chars().count(), 42);
        assert!(gel.starts_with("Gel Fijador 250ml "));
        assert!(gel.ends_with("     2     $17.00"));

        let n = lines.len();
        assert_eq!(lines[n - 3].trim(), "Subtotal: $62.99");
        assert_eq!(lines[n - 2].trim(), "Tax (18%): $11.34");
        assert_eq!(lines[n - 1].trim(), "TOTAL: $74.33");
        assert!(lines[n - 1].ends_with("TOTAL: $74.33"));
    }

    #[test]
    fn test_render_truncates_long_names() {
        let mut sale = sale();
        sale.items[0].name = "Tijeras de Precisión Profesionales Acero".to_string();
        let lines = Receipt::from_sale(&sale, TAX_RATE, utc()).render(32);

        let row = &lines[4];
        assert_eq!(row.chars().count(), 32);
        assert!(row.starts_with("Tijeras de Precis"));
    }

    #[test]
    fn test_display_uses_default_width() {
        let receipt = Receipt::from_sale(&sale(), TAX_RATE, utc());
        let text = receipt.to_string();
        assert_eq!(text.lines().count(), receipt.render(DEFAULT_PAPER_WIDTH).len());
        assert!(text.contains("Tijeras de Precisión"));
    }
}
