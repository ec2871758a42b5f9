//! Unit Calculator - keypad expression calculator with unit conversion
//!
//! Expressions are typed one key at a time, shaped by accumulation rules
//! as they grow, evaluated on demand by a small recursive-descent parser,
//! and shown in three linearly related units (Eth, Gwei, Wei).
//!
//! # Example
//!
//! ```rust
//! use unit_calculator::prelude::*;
//!
//! let mut session = CalculatorSession::new();
//! for key in "7++3".chars() {
//!     session.append_char(key).unwrap();
//! }
//! assert_eq!(session.expression(), "7+3");
//!
//! let snap = session.evaluate();
//! assert_eq!(snap.expression, "10");
//! assert_eq!(snap.formatted.milli9, "10,000,000,000");
//!
//! // Division by zero raises the Invalid overlay instead of showing Infinity
//! session.set_expression("5/0");
//! assert!(session.evaluate().invalid);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod display;
pub mod session;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::accumulator::{Accumulator, AppendOutcome, Digit, InputToken};
    pub use crate::core::evaluator::{canonical_string, Evaluator};
    pub use crate::core::expression::{Expression, NumericRun};
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::sanitizer::is_safe;
    pub use crate::core::units::{on_unit_change, to_base, Unit, UnitValues};
    pub use crate::core::{CalcError, CalcResult, Operand};
    pub use crate::display::{format_grouped, FormattedUnitValues};
    pub use crate::session::{CalculatorSession, Snapshot, VALIDATION_MESSAGE};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("2+3"), Ok(5.0));
        assert!(is_safe("2+3"));
        assert_eq!(Unit::Milli9.label(), "Gwei");
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let mut session = CalculatorSession::with_unit(Unit::Milli18);
        for key in "1.5*2".chars() {
            session.append_char(key).unwrap();
        }
        let snap = session.evaluate();
        assert_eq!(snap.expression, "3");
        assert_eq!(snap.result, 3e-18);
        assert_eq!(snap.formatted.milli18, "3");
    }
}
