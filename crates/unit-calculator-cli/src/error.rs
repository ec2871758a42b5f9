//! Error types for the CLI

use thiserror::Error;
use unit_calculator::prelude::CalcError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// A command typed in the wrong form
    #[error("Usage error: {message}")]
    Usage {
        /// Error message
        message: String,
    },

    /// The expression did not evaluate; the overlay message and cause
    #[error("{message}: {cause}")]
    Invalid {
        /// User-facing validation message
        message: String,
        /// What made the expression invalid
        cause: CalcError,
    },

    /// Calculator error outside evaluation (unknown key, bad literal)
    #[error(transparent)]
    Calc(#[from] CalcError),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a usage error
    #[must_use]
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Create an invalid-expression error
    #[must_use]
    pub fn invalid(message: impl Into<String>, cause: CalcError) -> Self {
        Self::Invalid {
            message: message.into(),
            cause,
        }
    }
}
