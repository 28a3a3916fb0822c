//! Error types for the bondcalc engine.
//!
//! Two kinds of failure exist: inputs that are malformed or out of range, and
//! operations that are mathematically undefined for otherwise valid inputs.

use thiserror::Error;

/// A specialized Result type for bondcalc operations.
pub type BondResult<T> = Result<T, BondError>;

/// The main error type for bondcalc operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Malformed or out-of-domain input.
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput {
        /// Name of the offending input.
        field: String,
        /// Description of what is wrong with it.
        reason: String,
    },

    /// Mathematically undefined operation.
    #[error("Domain error: {reason}")]
    Domain {
        /// Description of the undefined operation.
        reason: String,
    },
}

impl BondError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a domain error.
    #[must_use]
    pub fn domain(reason: impl Into<String>) -> Self {
        Self::Domain {
            reason: reason.into(),
        }
    }

    /// Returns true for [`BondError::InvalidInput`].
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Returns true for [`BondError::Domain`].
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }
}
