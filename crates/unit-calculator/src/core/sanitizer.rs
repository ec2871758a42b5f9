//! Character whitelist checked before an expression is evaluated

use crate::core::CalcError;

/// Returns true if `c` may appear in an evaluable expression
#[must_use]
pub const fn is_allowed(c: char) -> bool {
    matches!(c, '0'..='9' | '.' | '+' | '-' | '*' | '/' | '(' | ')')
}

/// True iff every character is a digit, `.`, `+`, `-`, `*`, `/`, `(` or `)`
#[must_use]
pub fn is_safe(expression: &str) -> bool {
    expression.chars().all(is_allowed)
}

/// Character index and value of the first disallowed character
#[must_use]
pub fn first_unsafe_char(expression: &str) -> Option<(usize, char)> {
    expression.chars().enumerate().find(|&(_, c)| !is_allowed(c))
}

/// Checks the whitelist, describing the first offending character
pub fn check(expression: &str) -> Result<(), CalcError> {
    match first_unsafe_char(expression) {
        Some((position, found)) => Err(CalcError::UnsafeExpression { position, found }),
        None => Ok(()),
    }
}
