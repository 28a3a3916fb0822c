//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration key not recognised.
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Configuration value rejected by its key.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Key being set.
        key: &'static str,
        /// What is wrong with the value.
        reason: String,
    },

    /// Configuration file could not be located or decoded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Batch input holds no bonds.
    #[error("Input file {0} contains no bonds")]
    EmptyInput(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
