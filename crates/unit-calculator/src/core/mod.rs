//! Calculator core: expression model, accumulation rules, sanitizer,
//! parser/evaluator and unit conversion.
//!
//! Everything in here is synchronous and owns no global state. A
//! [`crate::session::CalculatorSession`] ties the pieces together.

pub mod accumulator;
pub mod evaluator;
pub mod expression;
mod operand;
pub mod parser;
pub mod sanitizer;
pub mod units;

pub use operand::Operand;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// Only input shape can make an operation fail; nothing here is transient,
/// so there is no retry concept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The expression holds a character outside the evaluable alphabet
    #[error("Unsafe expression: unexpected '{found}' at position {position}")]
    UnsafeExpression {
        /// Character index of the first offending character
        position: usize,
        /// The offending character
        found: char,
    },

    /// The expression passed the sanitizer but is not well formed
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    /// Evaluation produced an infinite or NaN value
    #[error("Result is not a finite number")]
    NonFiniteResult,

    /// Nothing to evaluate
    #[error("Empty expression")]
    EmptyExpression,

    /// A key/token outside the keypad alphabet reached the accumulator boundary
    #[error("Unsupported input token: '{0}'")]
    UnsupportedToken(char),

    /// A unit name that does not match any known denomination
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),
}

impl CalcError {
    /// Create a malformed expression error
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedExpression(message.into())
    }

    /// Returns true for errors that mark the expression as invalid
    /// (the session raises its Invalid overlay for these)
    #[must_use]
    pub const fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            Self::UnsafeExpression { .. } | Self::MalformedExpression(_) | Self::NonFiniteResult
        )
    }
}
