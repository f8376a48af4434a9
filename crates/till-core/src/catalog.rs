//! Default seed catalog, installed when a loaded dataset has no products.

use crate::money::Money;
use crate::types::Product;

/// `(id, name, price in cents, stock)`
const SEED: [(i64, &str, i64, i64); 6] = [
    (101, "Tijeras de Precisión", 4599, 15),
    (102, "Gel Fijador 250ml", 850, 120),
    (103, "Champú Hidratante", 1500, 80),
    (104, "Crema para Afeitar", 1299, 60),
    (105, "Toalla Desechable x100", 2000, 30),
    (106, "Laca Capilar Mega", 999, 90),
];

/// Returns the six-product seed catalog.
pub fn default_catalog() -> Vec<Product> {
    SEED.iter()
        .map(|&(id, name, price, stock)| Product::new(id, name, Money::from_cents(price), stock))
        .collect()
}
