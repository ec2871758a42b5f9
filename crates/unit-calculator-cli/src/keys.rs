//! Key sequence handling
//!
//! One character is one key press. Control keys map onto session
//! operations; every other character is offered to the accumulator.

use crate::error::CliResult;
use unit_calculator::prelude::{CalculatorSession, Snapshot};

/// Actions that can be triggered by a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Type a keypad character
    Type(char),
    /// Evaluate the expression (`=`)
    Evaluate,
    /// Delete the last character (`<`)
    Backspace,
    /// Clear expression and result (`C`)
    Clear,
    /// Ignored input (whitespace)
    None,
}

impl KeyAction {
    /// Maps a key character to an action
    #[must_use]
    pub fn from_key(key: char) -> Self {
        match key {
            '=' => Self::Evaluate,
            '<' => Self::Backspace,
            'C' | 'c' => Self::Clear,
            k if k.is_whitespace() => Self::None,
            k => Self::Type(k),
        }
    }

    /// Applies the action to a session
    ///
    /// Only `Type` can fail, when the character is not a keypad key.
    pub fn apply(self, session: &mut CalculatorSession) -> CliResult<Snapshot> {
        let snapshot = match self {
            Self::Type(key) => session.append_char(key)?,
            Self::Evaluate => session.evaluate(),
            Self::Backspace => session.backspace(),
            Self::Clear => session.clear(),
            Self::None => session.snapshot(),
        };
        Ok(snapshot)
    }
}

/// Replays a key sequence, stopping at the first rejected key
pub fn apply_sequence(session: &mut CalculatorSession, sequence: &str) -> CliResult<Snapshot> {
    for key in sequence.chars() {
        KeyAction::from_key(key).apply(session)?;
    }
    Ok(session.snapshot())
}
