//! AST evaluator
//!
//! Every intermediate value is checked, so a division by zero deep inside
//! an expression surfaces as [`CalcError::NonFiniteResult`] instead of
//! leaking an infinity into the result.

use crate::core::operand::check_finite;
use crate::core::parser::{AstNode, Parser};
use crate::core::{sanitizer, CalcResult};

/// Evaluator for AST expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates an AST node and returns the result
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<f64> {
        match node {
            AstNode::Number(n) => check_finite(*n),
            AstNode::Negate(inner) => Ok(-self.evaluate(inner)?),
            AstNode::Chain { first, rest } => rest
                .iter()
                .try_fold(self.evaluate(first)?, |acc, (op, operand)| {
                    op.apply(acc, self.evaluate(operand)?)
                }),
        }
    }

    /// Parses and evaluates a string expression
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        self.evaluate(&ast)
    }

    /// Sanitizer check, then parse and evaluate
    pub fn evaluate_checked(&self, input: &str) -> CalcResult<f64> {
        sanitizer::check(input)?;
        self.evaluate_str(input)
    }
}

/// Canonical decimal rendering of an evaluated value
///
/// Shortest representation that round-trips, never in exponent notation,
/// so the text can be typed on from directly.
#[must_use]
pub fn canonical_string(value: f64) -> String {
    if value == 0.0 {
        // folds -0 into 0
        return "0".to_string();
    }
    value.to_string()
}
