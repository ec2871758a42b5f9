//! Per-token accumulation rules
//!
//! Tokens come from the keypad one at a time. The accumulator keeps two
//! shape rules while the expression grows:
//!
//! - two operands never sit next to each other; the most recent one wins
//! - a numeric run never holds more than one decimal point

use crate::core::expression::Expression;
use crate::core::{CalcError, CalcResult, Operand};
use serde::{Deserialize, Serialize};

/// A decimal digit, always 0-9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Returns `None` for values above 9
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Numeric value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The ASCII character for this digit
    #[must_use]
    pub const fn to_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl TryFrom<u8> for Digit {
    type Error = CalcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
            .ok_or_else(|| CalcError::malformed(format!("digit out of range: {value}")))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

/// A single keypad token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputToken {
    /// A digit 0-9
    Digit(Digit),
    /// One of the four operands
    Operand(Operand),
    /// The decimal point
    Point,
}

impl InputToken {
    /// Maps a key character onto a token
    ///
    /// Accepts the display glyphs `x`, `X`, `×` and `÷` as aliases for
    /// multiply and divide. Anything else is rejected here, at the
    /// boundary, so the accumulator itself stays total.
    pub fn from_char(c: char) -> CalcResult<Self> {
        match c {
            '0'..='9' => Ok(Self::Digit(Digit(c as u8 - b'0'))),
            '.' => Ok(Self::Point),
            'x' | 'X' | '×' => Ok(Self::Operand(Operand::Multiply)),
            '÷' => Ok(Self::Operand(Operand::Divide)),
            _ => Operand::from_symbol(c)
                .map(Self::Operand)
                .ok_or(CalcError::UnsupportedToken(c)),
        }
    }

    /// A digit token; values above 9 are rejected
    pub fn digit(value: u8) -> CalcResult<Self> {
        Digit::try_from(value).map(Self::Digit)
    }

    /// The character this token writes into the expression
    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Digit(d) => d.to_char(),
            Self::Operand(op) => op.symbol(),
            Self::Point => '.',
        }
    }

    /// Returns true for operand tokens
    #[must_use]
    pub const fn is_operand(self) -> bool {
        matches!(self, Self::Operand(_))
    }
}

impl std::fmt::Display for InputToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Which accumulation rule an append took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppendOutcome {
    /// The token was appended
    Appended,
    /// The token replaced a trailing operand
    ReplacedOperand,
    /// The token was silently dropped (second point in a run)
    Dropped,
}

impl AppendOutcome {
    /// Returns true if the expression changed
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Dropped)
    }
}

/// Stateless accumulation rules over an [`Expression`]
#[derive(Debug, Default, Clone, Copy)]
pub struct Accumulator;

impl Accumulator {
    /// Appends `token` to `expr`, enforcing the per-token rules
    pub fn append(expr: &mut Expression, token: InputToken) -> AppendOutcome {
        match token {
            InputToken::Operand(op) if expr.ends_with_operand() => {
                expr.replace_last(op.symbol());
                AppendOutcome::ReplacedOperand
            }
            InputToken::Point => {
                if expr
                    .current_trailing_run()
                    .is_some_and(|run| run.has_point())
                {
                    AppendOutcome::Dropped
                } else {
                    expr.append('.');
                    AppendOutcome::Appended
                }
            }
            _ => {
                expr.append(token.to_char());
                AppendOutcome::Appended
            }
        }
    }

    /// Appends every token in order, returning the final expression
    pub fn append_all<I>(expr: &mut Expression, tokens: I)
    where
        I: IntoIterator<Item = InputToken>,
    {
        for token in tokens {
            Self::append(expr, token);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn type_keys(keys: &str) -> Expression {
        let mut expr = Expression::new();
        for c in keys.chars() {
            Accumulator::append(&mut expr, InputToken::from_char(c).unwrap());
        }
        expr
    }

    // ===== Token boundary =====

    #[test]
    fn test_from_char_digits() {
        for d in 0..=9u8 {
            let c = char::from(b'0' + d);
            assert_eq!(InputToken::from_char(c), InputToken::digit(d));
        }
    }

    #[test]
    fn test_digit_out_of_range_rejected() {
        assert_eq!(Digit::new(9).map(Digit::value), Some(9));
        assert_eq!(Digit::new(10), None);
        assert!(matches!(
            InputToken::digit(12),
            Err(CalcError::MalformedExpression(_))
        ));
    }

    #[test]
    fn test_digit_serde_rejects_out_of_range() {
        let token = InputToken::digit(7).unwrap();
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#"{"Digit":7}"#);
        assert_eq!(serde_json::from_str::<InputToken>(&json).unwrap(), token);
        assert!(serde_json::from_str::<InputToken>(r#"{"Digit":12}"#).is_err());
    }

    #[test]
    fn test_from_char_operands_and_aliases() {
        assert_eq!(
            InputToken::from_char('+'),
            Ok(InputToken::Operand(Operand::Add))
        );
        assert_eq!(
            InputToken::from_char('x'),
            Ok(InputToken::Operand(Operand::Multiply))
        );
        assert_eq!(
            InputToken::from_char('×'),
            Ok(InputToken::Operand(Operand::Multiply))
        );
        assert_eq!(
            InputToken::from_char('÷'),
            Ok(InputToken::Operand(Operand::Divide))
        );
        assert_eq!(InputToken::from_char('.'), Ok(InputToken::Point));
    }

    #[test]
    fn test_from_char_rejects_outside_alphabet() {
        for c in ['a', '(', ')', ' ', '%', '^', '='] {
            assert_eq!(
                InputToken::from_char(c),
                Err(CalcError::UnsupportedToken(c))
            );
        }
    }

    #[test]
    fn test_to_char() {
        assert_eq!(InputToken::digit(7).unwrap().to_char(), '7');
        assert_eq!(InputToken::Operand(Operand::Divide).to_char(), '/');
        assert_eq!(InputToken::Point.to_string(), ".");
        assert!(InputToken::Operand(Operand::Add).is_operand());
        assert!(!InputToken::Point.is_operand());
    }

    // ===== Operand collapse =====

    #[test]
    fn test_double_operand_collapses() {
        assert_eq!(type_keys("7++3").as_str(), "7+3");
    }

    #[test]
    fn test_latest_operand_wins() {
        assert_eq!(type_keys("7+-*/").as_str(), "7/");
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut expr = Expression::from("12-");
        let outcome = Accumulator::append(&mut expr, InputToken::Operand(Operand::Multiply));
        assert_eq!(outcome, AppendOutcome::ReplacedOperand);
        assert_eq!(expr.as_str(), "12*");
        assert_eq!(expr.len(), 3);
    }

    #[test]
    fn test_leading_operand_is_appended() {
        let mut expr = Expression::new();
        let outcome = Accumulator::append(&mut expr, InputToken::Operand(Operand::Subtract));
        assert_eq!(outcome, AppendOutcome::Appended);
        assert_eq!(expr.as_str(), "-");
    }

    // ===== Decimal point =====

    #[test]
    fn test_second_point_in_run_dropped() {
        assert_eq!(type_keys("1..2").as_str(), "1.2");
    }

    #[test]
    fn test_point_after_completed_decimal_run_dropped() {
        let mut expr = Expression::from("1.25");
        assert_eq!(
            Accumulator::append(&mut expr, InputToken::Point),
            AppendOutcome::Dropped
        );
        assert_eq!(expr.as_str(), "1.25");
    }

    #[test]
    fn test_point_allowed_in_new_run() {
        assert_eq!(type_keys("1.5+2.5").as_str(), "1.5+2.5");
    }

    #[test]
    fn test_point_after_operand() {
        assert_eq!(type_keys("1.5*.").as_str(), "1.5*.");
    }

    #[test]
    fn test_point_on_empty_expression() {
        assert_eq!(type_keys(".5").as_str(), ".5");
    }

    #[test]
    fn test_outcome_changed() {
        assert!(AppendOutcome::Appended.changed());
        assert!(AppendOutcome::ReplacedOperand.changed());
        assert!(!AppendOutcome::Dropped.changed());
    }

    #[test]
    fn test_append_all() {
        let mut expr = Expression::new();
        Accumulator::append_all(
            &mut expr,
            [
                InputToken::digit(4).unwrap(),
                InputToken::Operand(Operand::Add),
                InputToken::Operand(Operand::Subtract),
                InputToken::digit(2).unwrap(),
            ],
        );
        assert_eq!(expr.as_str(), "4-2");
    }
}
