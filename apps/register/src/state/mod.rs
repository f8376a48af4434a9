//! # Register State
//!
//! ```text
//! state/
//! ├── config.rs   ◄─── RegisterConfig (till.toml + TILL_* overrides)
//! └── session.rs  ◄─── Session: store, dataset, cart, clock
//! ```
//!
//! There is no global state: `run` builds one [`Session`] and lends it to
//! each command in turn.

pub mod config;
pub mod session;

pub use config::RegisterConfig;
pub use session::{CheckoutOutcome, Session};
