//! # Seed Data File
//!
//! Writes the default catalog into a dataset document.
//!
//! ## Usage
//! ```bash
//! # Seed ./data.json (default)
//! cargo run -p till-store --bin seed
//!
//! # Specify the data file
//! cargo run -p till-store --bin seed -- --data ./var/data.json
//! ```
//!
//! An existing catalog is left alone; delete the file to regenerate it.
//! A file that cannot be read is replaced, the same way the register
//! recovers at startup.

use std::env;
use std::sync::Arc;
use till_core::view::catalog_view;
use till_store::backend::DEFAULT_RESOURCE;
use till_store::{CatalogStore, JsonFileBackend};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut data_path = String::from(DEFAULT_RESOURCE);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Till Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data <PATH>  Dataset file path (default: ./data.json)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Till Seed Data Generator");
    println!("========================");
    println!("Data file: {}", data_path);
    println!();

    let store = CatalogStore::new(Arc::new(JsonFileBackend::new(&data_path)));
    let mut dataset = store.load_or_heal().await;

    if !CatalogStore::seed_if_empty(&mut dataset) {
        println!("⚠ Data file already has {} products", dataset.inventory.len());
        println!("  Skipping seed to avoid overwriting the catalog.");
        return Ok(());
    }

    store.save(&dataset).await?;

    for row in catalog_view(&dataset) {
        println!("  {:>4}  {:<24} {:>8}  stock {}", row.id, row.name, row.price.to_string(), row.stock);
    }
    println!();
    println!("✓ Seeded {} products", dataset.inventory.len());

    Ok(())
}
