//! # Till Register Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          till (binary)                                  │
//! │                                                                         │
//! │   stdin  ──► commands ──► Session ──► till-core (cart, checkout)        │
//! │                              │                                          │
//! │                              └──────► till-store ──► data.json          │
//! │   stdout ◄── views, receipts                                            │
//! │   stderr ◄── tracing logs                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match till_register::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("till: {}", e);
            ExitCode::FAILURE
        }
    }
}
