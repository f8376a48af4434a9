//! # Till Register Library
//!
//! The operator-facing register: reads commands from stdin, prints views
//! and receipts to stdout, logs to stderr.
//!
//! ## Module Organization
//! ```text
//! till_register/
//! ├── lib.rs          ◄─── You are here (startup & command loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── RegisterConfig
//! │   └── session.rs  ◄─── Session (store, dataset, cart, clock)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command parsing and dispatch
//! │   ├── cart.rs     ◄─── Catalog and cart commands
//! │   └── sale.rs     ◄─── Checkout, sales list, receipts
//! └── error.rs        ◄─── RegisterError
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use till_core::SystemClock;
use till_store::{CatalogStore, JsonFileBackend, MemoryBackend, PersistenceBackend};

use commands::Command;
use error::{RegisterError, RegisterResult};
use state::{RegisterConfig, Session};

/// Command line options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    /// `--config <path>`: config file to use instead of the default location
    pub config: Option<PathBuf>,
    /// `--ephemeral`: keep the dataset in memory only
    pub ephemeral: bool,
    /// `--help`
    pub help: bool,
}

const USAGE: &str = "\
Usage: till [OPTIONS]

Options:
  -c, --config <PATH>  Config file (default: till.toml in the config directory)
      --ephemeral      Do not read or write the data file
  -h, --help           Show this help message";

impl CliOptions {
    /// Parses arguments, excluding the program name.
    pub fn parse(args: impl IntoIterator<Item = String>) -> RegisterResult<Self> {
        let mut options = CliOptions::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args
                        .next()
                        .ok_or_else(|| RegisterError::config("--config needs a path"))?;
                    options.config = Some(PathBuf::from(path));
                }
                "--ephemeral" => options.ephemeral = true,
                "--help" | "-h" => options.help = true,
                other => {
                    return Err(RegisterError::config(format!(
                        "unknown argument '{}'",
                        other
                    )))
                }
            }
        }

        Ok(options)
    }
}

/// Runs the register until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Register Startup                                  │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, writing to stderr             │
/// │     • Default: info,till=debug; override with RUST_LOG                  │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → till.toml → TILL_* environment                         │
/// │                                                                         │
/// │  3. Open the Store ───────────────────────────────────────────────────► │
/// │     • JSON data file, or memory with --ephemeral                        │
/// │     • Self-heal on a bad file, seed an empty catalog                    │
/// │                                                                         │
/// │  4. Command Loop ─────────────────────────────────────────────────────► │
/// │     • one stdin line = one command, run to completion                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> RegisterResult<()> {
    let options = CliOptions::parse(std::env::args().skip(1))?;
    if options.help {
        println!("{}", USAGE);
        return Ok(());
    }

    init_tracing();

    info!("Starting Till register");

    let config = RegisterConfig::load_or_default(options.config.clone());
    let backend: Arc<dyn PersistenceBackend> = if options.ephemeral {
        warn!("Ephemeral session: sales will not be written to disk");
        Arc::new(MemoryBackend::new())
    } else {
        Arc::new(JsonFileBackend::new(&config.data_file))
    };
    info!(resource = %backend.resource(), paper_width = config.paper_width, "Store selected");

    let store = CatalogStore::new(backend);
    let mut session = Session::open(store, Box::new(SystemClock), config.seed_on_empty).await;

    command_loop(&mut session, &config).await
}

/// Reads commands until `quit` or end of input.
async fn command_loop(session: &mut Session, config: &RegisterConfig) -> RegisterResult<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    write_lines(&mut stdout, &[format!("{} (type 'help' for commands)", config.store_name)]).await?;

    while let Some(line) = input.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let output = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => commands::dispatch(session, config, command).await,
            Err(e) => {
                warn!(input = %line.trim(), error = %e, "Rejected operator input");
                vec![e.to_string()]
            }
        };

        write_lines(&mut stdout, &output).await?;
    }

    info!(sales = session.sales().len(), "Register closed");
    Ok(())
}

async fn write_lines(stdout: &mut tokio::io::Stdout, lines: &[String]) -> RegisterResult<()> {
    let mut buf = lines.join("\n");
    buf.push('\n');
    stdout.write_all(buf.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=till_store=trace` - Trace the persistence layer only
/// - Default: INFO, DEBUG for the till crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,till=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(CliOptions::parse(args(&[])).unwrap(), CliOptions::default());
    }

    #[test]
    fn test_parse_options() {
        let options =
            CliOptions::parse(args(&["--config", "/etc/till.toml", "--ephemeral"])).unwrap();
        assert_eq!(options.config, Some(PathBuf::from("/etc/till.toml")));
        assert!(options.ephemeral);
        assert!(!options.help);
    }

    #[test]
    fn test_parse_rejects_bad_args() {
        assert!(matches!(
            CliOptions::parse(args(&["--config"])),
            Err(RegisterError::Config(_))
        ));
        assert!(matches!(
            CliOptions::parse(args(&["--verbose"])),
            Err(RegisterError::Config(_))
        ));
    }
}
