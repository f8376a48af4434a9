//! # Register Error Type
//!
//! Errors surfaced by the register front end.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Register                           │
//! │                                                                         │
//! │  startup ── bad till.toml ──► RegisterError::Config ──► warn!, defaults │
//! │                                                                         │
//! │  stdin line ── "add abc" ──► RegisterError::InvalidCommand              │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                         printed, loop continues                         │
//! │                                                                         │
//! │  checkout ── save fails ──► StoreError (logged by the store)            │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                 sale kept in memory, operator told it is unsaved        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations never produce errors; see [`till_core::CartChange`].

use thiserror::Error;
use till_store::StoreError;

/// Errors from the register front end.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Configuration could not be read or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal or config file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The operator typed something that is not a command.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// The persistence layer failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl RegisterError {
    /// Creates an invalid command error.
    pub fn invalid_command(message: impl Into<String>) -> Self {
        RegisterError::InvalidCommand(message.into())
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        RegisterError::Config(message.into())
    }
}

impl From<toml::de::Error> for RegisterError {
    fn from(err: toml::de::Error) -> Self {
        RegisterError::Config(err.to_string())
    }
}

/// Result type alias for register operations.
pub type RegisterResult<T> = Result<T, RegisterError>;
