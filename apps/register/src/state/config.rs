//! # Register Configuration
//!
//! Settings read once at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`--config <path>`, else `till.toml` in the platform
//!    config directory)
//! 3. Environment variables (`TILL_*`)
//!
//! ```text
//!     ~/.config/till/till.toml                             (Linux)
//!     ~/Library/Application Support/com.till.register/till.toml (macOS)
//! ```
//!
//! ## Example Config File
//! ```toml
//! store_name = "Barbería Central"
//! data_file = "/var/lib/till/data.json"
//! paper_width = 32
//! seed_on_empty = true
//! ```
//!
//! Configuration is read-only after startup, so it is shared by reference.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use till_core::receipt::DEFAULT_PAPER_WIDTH;
use till_store::backend::DEFAULT_RESOURCE;

use crate::error::{RegisterError, RegisterResult};

/// Receipt paper widths in characters that printers actually ship with.
pub const PAPER_WIDTHS: [usize; 3] = [32, 42, 48];

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "till.toml";

/// Register configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterConfig {
    /// Store name (printed above receipts)
    pub store_name: String,

    /// Path of the dataset document
    pub data_file: PathBuf,

    /// Receipt width in characters (32, 42 or 48)
    pub paper_width: usize,

    /// Install the default catalog when the inventory is empty
    pub seed_on_empty: bool,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        RegisterConfig {
            store_name: "Till".to_string(),
            data_file: PathBuf::from(DEFAULT_RESOURCE),
            paper_width: DEFAULT_PAPER_WIDTH,
            seed_on_empty: true,
        }
    }
}

impl RegisterConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> RegisterResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading register config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load register config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> RegisterResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> RegisterResult<()> {
        if !PAPER_WIDTHS.contains(&self.paper_width) {
            return Err(RegisterError::config(format!(
                "paper_width must be one of 32, 42 or 48, got {}",
                self.paper_width
            )));
        }

        if self.data_file.as_os_str().is_empty() {
            return Err(RegisterError::config("data_file must not be empty"));
        }

        Ok(())
    }

    /// Applies `TILL_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("TILL_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(path) = lookup("TILL_DATA_FILE") {
            debug!(data_file = %path, "Overriding data file from environment");
            self.data_file = PathBuf::from(path);
        }

        if let Some(width) = lookup("TILL_PAPER_WIDTH") {
            match width.parse::<usize>() {
                Ok(w) => self.paper_width = w,
                Err(_) => warn!(width = %width, "Ignoring non-numeric TILL_PAPER_WIDTH"),
            }
        }

        if let Some(seed) = lookup("TILL_SEED") {
            match seed.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.seed_on_empty = true,
                "0" | "false" | "no" | "off" => self.seed_on_empty = false,
                _ => warn!(seed = %seed, "Unknown TILL_SEED value"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "till", "register")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
