//! # Operator Commands
//!
//! One line of stdin is one command.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs   ◄─── You are here (parsing + dispatch)
//! ├── cart.rs  ◄─── catalog, add, inc, dec, rm, cart, cancel
//! └── sale.rs  ◄─── pay, sales, receipt
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  stdin: "add 102"                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  "add 102".parse::<Command>() ── Err ──► RegisterError::InvalidCommand  │
//! │         │ Ok(Command::Add(ProductId(102)))                              │
//! │         ▼                                                               │
//! │  dispatch(&mut session, &config, command)                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Vec<String> ──► stdout                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers return the lines to print instead of printing, so they can be
//! tested without a terminal.

pub mod cart;
pub mod sale;

use std::str::FromStr;

use till_core::{Adjustment, ProductId, SaleId};

use crate::error::{RegisterError, RegisterResult};
use crate::state::{RegisterConfig, Session};

/// Usage text printed by `help`.
pub const HELP: &str = "\
Commands:
  catalog, ls         Show products with price and stock
  add <id>            Add one unit of a product to the cart
  inc <id>            Increase a cart line by one
  dec <id>            Decrease a cart line by one (removes it at zero)
  rm <id>             Remove a cart line
  cart                Show the cart with totals
  cancel              Empty the cart
  pay, checkout       Charge the cart and print the receipt
  sales               List recorded sales
  receipt <sale id>   Reprint the receipt of a recorded sale
  help                Show this help
  quit, exit          Leave the register";

/// A parsed operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Catalog,
    Add(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Remove(ProductId),
    Cart,
    Cancel,
    Checkout,
    Sales,
    Receipt(SaleId),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = RegisterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| RegisterError::invalid_command("empty command"))?
            .to_lowercase();
        let arg = words.next();

        if let Some(extra) = words.next() {
            return Err(RegisterError::invalid_command(format!(
                "unexpected argument '{}' to '{}'",
                extra, verb
            )));
        }

        let command = match verb.as_str() {
            "catalog" | "ls" => Command::Catalog,
            "add" => Command::Add(ProductId(parse_id(&verb, arg)?)),
            "inc" => Command::Increase(ProductId(parse_id(&verb, arg)?)),
            "dec" => Command::Decrease(ProductId(parse_id(&verb, arg)?)),
            "rm" => Command::Remove(ProductId(parse_id(&verb, arg)?)),
            "cart" => Command::Cart,
            "cancel" => Command::Cancel,
            "pay" | "checkout" => Command::Checkout,
            "sales" => Command::Sales,
            "receipt" => Command::Receipt(SaleId(parse_id(&verb, arg)?)),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(RegisterError::invalid_command(format!(
                    "unknown command '{}' (try 'help')",
                    other
                )))
            }
        };

        if arg.is_some() && !command.takes_id() {
            return Err(RegisterError::invalid_command(format!(
                "'{}' takes no arguments",
                verb
            )));
        }

        Ok(command)
    }
}

impl Command {
    fn takes_id(&self) -> bool {
        matches!(
            self,
            Command::Add(_)
                | Command::Increase(_)
                | Command::Decrease(_)
                | Command::Remove(_)
                | Command::Receipt(_)
        )
    }
}

fn parse_id(verb: &str, arg: Option<&str>) -> RegisterResult<i64> {
    let arg = arg.ok_or_else(|| RegisterError::invalid_command(format!("'{}' needs an id", verb)))?;
    arg.parse::<i64>()
        .map_err(|_| RegisterError::invalid_command(format!("'{}' is not a valid id", arg)))
}

/// Runs one command against the session and returns what to print.
///
/// `Quit` is handled by the caller; here it prints nothing.
pub async fn dispatch(
    session: &mut Session,
    config: &RegisterConfig,
    command: Command,
) -> Vec<String> {
    match command {
        Command::Catalog => cart::catalog(session),
        Command::Add(id) => cart::add(session, id),
        Command::Increase(id) => cart::adjust(session, id, Adjustment::Increase),
        Command::Decrease(id) => cart::adjust(session, id, Adjustment::Decrease),
        Command::Remove(id) => cart::remove(session, id),
        Command::Cart => cart::show(session),
        Command::Cancel => cart::cancel(session),
        Command::Checkout => sale::checkout(session, config).await,
        Command::Sales => sale::sales(session),
        Command::Receipt(id) => sale::receipt(session, config, id),
        Command::Help => HELP.lines().map(str::to_string).collect(),
        Command::Quit => Vec::new(),
    }
}
