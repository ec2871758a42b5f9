//! Calculator session state
//!
//! One session is one calculator instance. It owns the expression, the
//! canonical base-unit result, the selected unit and the Invalid overlay.
//! Every operation is synchronous and returns the updated [`Snapshot`].
//!
//! A session is not re-entrant. Hosts that share one across threads must
//! serialize calls themselves (e.g. behind a `Mutex`). The type is `Send`
//! and carries no interior locking.

use crate::core::accumulator::{Accumulator, InputToken};
use crate::core::evaluator::{canonical_string, Evaluator};
use crate::core::expression::Expression;
use crate::core::units::{self, Unit, UnitValues};
use crate::core::{CalcError, CalcResult};
use crate::display::FormattedUnitValues;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Message shown while the Invalid overlay is raised
pub const VALIDATION_MESSAGE: &str = "Error! Check your input";

/// Read-only view of a session after an operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current expression text
    pub expression: String,
    /// Whether the Invalid overlay is raised
    pub invalid: bool,
    /// The selected unit
    pub unit: Unit,
    /// Canonical result in base units
    pub result: f64,
    /// The result in every unit
    pub values: UnitValues,
    /// The result rendered for display
    pub formatted: FormattedUnitValues,
    /// Description of the last rejected evaluation, while Invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Snapshot {
    /// Returns true when there is a non-zero result to show
    #[must_use]
    pub fn has_result(&self) -> bool {
        self.result != 0.0
    }

    /// Serializes the snapshot to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the snapshot to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Calculator session
#[derive(Debug, Clone, Default)]
pub struct CalculatorSession {
    expression: Expression,
    result: f64,
    invalid: bool,
    unit: Unit,
    last_error: Option<CalcError>,
    evaluator: Evaluator,
}

impl CalculatorSession {
    /// Creates an empty session with the base unit selected
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session with `unit` selected
    #[must_use]
    pub fn with_unit(unit: Unit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    // ===== Accessors =====

    /// Current expression text
    #[must_use]
    pub fn expression(&self) -> &str {
        self.expression.as_str()
    }

    /// Whether the Invalid overlay is raised
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        self.invalid
    }

    /// The selected unit
    #[must_use]
    pub const fn unit(&self) -> Unit {
        self.unit
    }

    /// Canonical result in base units
    #[must_use]
    pub const fn result_base(&self) -> f64 {
        self.result
    }

    /// The result in every unit
    #[must_use]
    pub fn unit_values(&self) -> UnitValues {
        UnitValues::from_base(self.result)
    }

    /// The result rendered for display
    #[must_use]
    pub fn formatted_values(&self) -> FormattedUnitValues {
        FormattedUnitValues::from(self.unit_values())
    }

    /// The error behind the Invalid overlay, if raised
    #[must_use]
    pub const fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }

    /// User-facing validation message while Invalid
    #[must_use]
    pub const fn validation_message(&self) -> Option<&'static str> {
        if self.invalid {
            Some(VALIDATION_MESSAGE)
        } else {
            None
        }
    }

    /// Current state as a [`Snapshot`]
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            expression: self.expression.to_string(),
            invalid: self.invalid,
            unit: self.unit,
            result: self.result,
            values: self.unit_values(),
            formatted: self.formatted_values(),
            error: self.last_error.as_ref().map(ToString::to_string),
        }
    }

    // ===== Edits =====

    /// Appends a keypad token
    pub fn append(&mut self, token: InputToken) -> Snapshot {
        let outcome = Accumulator::append(&mut self.expression, token);
        debug!(%token, ?outcome, expression = %self.expression, "append");
        if outcome.changed() {
            self.clear_overlay();
        }
        self.snapshot()
    }

    /// Appends a key character, rejecting characters outside the keypad
    pub fn append_char(&mut self, c: char) -> CalcResult<Snapshot> {
        let token = InputToken::from_char(c).map_err(|e| {
            debug!(key = %c, "rejected key");
            e
        })?;
        Ok(self.append(token))
    }

    /// Deletes the final character; no-op on an empty expression
    pub fn backspace(&mut self) -> Snapshot {
        if let Some(removed) = self.expression.remove_last() {
            debug!(%removed, expression = %self.expression, "backspace");
            self.clear_overlay();
        }
        self.snapshot()
    }

    /// Resets expression, result and overlay; the unit stays selected
    pub fn clear(&mut self) -> Snapshot {
        self.expression.clear();
        self.result = 0.0;
        self.clear_overlay();
        debug!("clear");
        self.snapshot()
    }

    /// Replaces the expression as a free-text edit
    ///
    /// The text is not validated here; the sanitizer judges it on evaluate.
    pub fn set_expression(&mut self, text: &str) -> Snapshot {
        self.expression.set(text);
        self.clear_overlay();
        debug!(expression = %self.expression, "set expression");
        self.snapshot()
    }

    // ===== Evaluate / units =====

    /// Evaluates the expression
    ///
    /// Empty expression: nothing happens. Unsafe, malformed or non-finite:
    /// the Invalid overlay is raised and expression/result stay untouched.
    /// Success: the expression becomes the canonical rendering of the value
    /// and the result is that value read in the selected unit.
    pub fn evaluate(&mut self) -> Snapshot {
        if self.expression.is_empty() {
            return self.snapshot();
        }

        match self.evaluator.evaluate_checked(self.expression.as_str()) {
            Ok(value) => {
                self.expression.set(canonical_string(value));
                self.result = units::to_base(value, self.unit);
                self.clear_overlay();
                debug!(value, unit = %self.unit, result = self.result, "evaluated");
            }
            Err(error) => {
                warn!(expression = %self.expression, %error, "evaluation rejected");
                self.invalid = true;
                self.last_error = Some(error);
            }
        }
        self.snapshot()
    }

    /// Selects a unit, reinterpreting a bare literal in it
    pub fn select_unit(&mut self, unit: Unit) -> Snapshot {
        self.unit = unit;
        if let Some(result) = units::on_unit_change(unit, &self.expression) {
            self.result = result;
            debug!(%unit, result, "unit changed, literal reinterpreted");
        } else {
            debug!(%unit, "unit changed");
        }
        self.snapshot()
    }

    fn clear_overlay(&mut self) {
        self.invalid = false;
        self.last_error = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn typed(keys: &str) -> CalculatorSession {
        let mut session = CalculatorSession::new();
        for c in keys.chars() {
            session.append_char(c).unwrap();
        }
        session
    }

    // ===== Construction =====

    #[test]
    fn test_new_session() {
        let session = CalculatorSession::new();
        assert_eq!(session.expression(), "");
        assert!(!session.is_invalid());
        assert_eq!(session.unit(), Unit::Base);
        assert_eq!(session.result_base(), 0.0);
        assert!(!session.snapshot().has_result());
        assert_eq!(session.validation_message(), None);
    }

    #[test]
    fn test_with_unit() {
        assert_eq!(CalculatorSession::with_unit(Unit::Milli18).unit(), Unit::Milli18);
    }

    // ===== Appending =====

    #[test]
    fn test_append_builds_expression() {
        let session = typed("12.5*3");
        assert_eq!(session.expression(), "12.5*3");
    }

    #[test]
    fn test_append_char_rejects_unsupported() {
        let mut session = typed("1");
        assert_eq!(
            session.append_char('a'),
            Err(CalcError::UnsupportedToken('a'))
        );
        assert_eq!(session.expression(), "1");
    }

    #[test]
    fn test_successful_append_clears_overlay() {
        let mut session = CalculatorSession::new();
        session.set_expression("5+");
        session.evaluate();
        assert!(session.is_invalid());
        session.append(InputToken::digit(1).unwrap());
        assert!(!session.is_invalid());
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_dropped_point_keeps_overlay() {
        let mut session = CalculatorSession::new();
        session.set_expression("(1.5");
        session.evaluate();
        assert!(session.is_invalid());

        let snap = session.append(InputToken::Point);
        assert_eq!(snap.expression, "(1.5");
        assert!(snap.invalid);
    }

    // ===== Backspace / clear =====

    #[test]
    fn test_backspace() {
        let mut session = typed("12+");
        assert_eq!(session.backspace().expression, "12");
        assert_eq!(session.backspace().expression, "1");
        assert_eq!(session.backspace().expression, "");
        assert_eq!(session.backspace().expression, "");
    }

    #[test]
    fn test_backspace_on_empty_keeps_overlay_state() {
        let mut session = CalculatorSession::new();
        let before = session.snapshot();
        assert_eq!(session.backspace(), before);
    }

    #[test]
    fn test_clear_resets_everything_but_unit() {
        let mut session = CalculatorSession::with_unit(Unit::Milli9);
        session.set_expression("5");
        session.select_unit(Unit::Milli9);
        session.set_expression("5/0");
        session.evaluate();
        assert!(session.is_invalid());

        let snap = session.clear();
        assert_eq!(snap.expression, "");
        assert_eq!(snap.result, 0.0);
        assert!(!snap.invalid);
        assert_eq!(snap.error, None);
        assert_eq!(snap.unit, Unit::Milli9);
    }

    // ===== Evaluate =====

    #[test]
    fn test_evaluate_replaces_expression() {
        let mut session = typed("7+3*2");
        let snap = session.evaluate();
        assert_eq!(snap.expression, "13");
        assert_eq!(snap.result, 13.0);
        assert!(!snap.invalid);
        assert!(snap.has_result());
    }

    #[test]
    fn test_evaluate_empty_is_noop() {
        let mut session = CalculatorSession::new();
        let snap = session.evaluate();
        assert_eq!(snap.expression, "");
        assert!(!snap.invalid);
    }

    #[test]
    fn test_evaluate_under_sub_unit() {
        let mut session = CalculatorSession::with_unit(Unit::Milli9);
        session.set_expression("2*5");
        let snap = session.evaluate();
        assert_eq!(snap.expression, "10");
        assert_eq!(snap.result, 10.0 / 1e9);
        assert_eq!(snap.formatted.milli9, "10");
    }

    #[test]
    fn test_evaluate_unsafe_raises_overlay() {
        let mut session = CalculatorSession::new();
        session.set_expression("5+a");
        let snap = session.evaluate();
        assert!(snap.invalid);
        assert_eq!(snap.expression, "5+a");
        assert_eq!(snap.result, 0.0);
        assert_eq!(
            session.last_error(),
            Some(&CalcError::UnsafeExpression {
                position: 2,
                found: 'a'
            })
        );
        assert_eq!(session.validation_message(), Some(VALIDATION_MESSAGE));
    }

    #[test]
    fn test_evaluate_malformed_keeps_previous_result() {
        let mut session = typed("4*2");
        session.evaluate();
        session.append_char('+').unwrap();
        let snap = session.evaluate();
        assert!(snap.invalid);
        assert_eq!(snap.expression, "8+");
        assert_eq!(snap.result, 8.0);
        assert!(matches!(
            session.last_error(),
            Some(CalcError::MalformedExpression(_))
        ));
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        let mut session = typed("5/0");
        let snap = session.evaluate();
        assert!(snap.invalid);
        assert_eq!(snap.expression, "5/0");
        assert_eq!(session.last_error(), Some(&CalcError::NonFiniteResult));
        assert!(snap.error.unwrap().contains("finite"));
    }

    #[test]
    fn test_evaluate_negative_result_then_continue() {
        let mut session = typed("2-5");
        assert_eq!(session.evaluate().expression, "-3");
        session.append_char('*').unwrap();
        session.append_char('2').unwrap();
        assert_eq!(session.evaluate().expression, "-6");
    }

    // ===== Unit selection =====

    #[test]
    fn test_select_unit_reinterprets_literal() {
        let mut session = typed("5");
        let snap = session.select_unit(Unit::Milli9);
        assert_eq!(snap.unit, Unit::Milli9);
        assert_eq!(snap.result, 5.0 / 1e9);
        assert_eq!(snap.expression, "5");
    }

    #[test]
    fn test_select_unit_with_operator_keeps_result() {
        let mut session = typed("5");
        session.evaluate();
        session.append_char('+').unwrap();
        session.append_char('1').unwrap();
        let snap = session.select_unit(Unit::Milli18);
        assert_eq!(snap.unit, Unit::Milli18);
        assert_eq!(snap.result, 5.0);
    }

    #[test]
    fn test_select_unit_on_empty_only_changes_label() {
        let mut session = CalculatorSession::new();
        let snap = session.select_unit(Unit::Milli18);
        assert_eq!(snap.unit, Unit::Milli18);
        assert_eq!(snap.result, 0.0);
    }

    // ===== Snapshot =====

    #[test]
    fn test_snapshot_json() {
        let mut session = typed("1.5");
        session.evaluate();
        let json = session.snapshot().to_json().unwrap();
        assert!(json.contains("\"expression\":\"1.5\""));
        assert!(json.contains("\"unit\":\"eth\""));
        assert!(json.contains("\"milli9\":\"1,500,000,000\""));
        assert!(!json.contains("\"error\""));

        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session.snapshot());
    }
}
