//! In-memory expression under construction
//!
//! The expression is plain text. No validation happens here; the
//! [`Accumulator`](crate::core::accumulator::Accumulator) shapes it as
//! tokens arrive and the sanitizer/parser judge it on evaluate.

use crate::core::Operand;
use serde::{Deserialize, Serialize};

/// Returns true for characters that belong to a numeric run
#[must_use]
pub const fn is_run_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// A maximal contiguous run of digits and decimal points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericRun<'a> {
    text: &'a str,
    start: usize,
}

impl<'a> NumericRun<'a> {
    /// The run's text
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.text
    }

    /// Byte offset of the run inside its expression
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns true if the run already holds a decimal point
    #[must_use]
    pub fn has_point(&self) -> bool {
        self.text.contains('.')
    }

    /// Number of decimal points in the run
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.text.matches('.').count()
    }
}

/// The expression being typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expression {
    text: String,
}

impl Expression {
    /// Creates an empty expression
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the expression text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns true if nothing has been typed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Appends one character
    pub fn append(&mut self, c: char) {
        self.text.push(c);
    }

    /// Removes and returns the final character
    pub fn remove_last(&mut self) -> Option<char> {
        self.text.pop()
    }

    /// Overwrites the final character; appends when empty
    pub fn replace_last(&mut self, c: char) {
        self.text.pop();
        self.text.push(c);
    }

    /// Empties the expression
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Replaces the whole text (free-text edit)
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Final character, if any
    #[must_use]
    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }

    /// Returns true if the final character is an operand symbol
    #[must_use]
    pub fn ends_with_operand(&self) -> bool {
        self.last_char().is_some_and(Operand::is_symbol)
    }

    /// The numeric run ending at the end of the expression
    ///
    /// `None` when the expression is empty or its last character is not
    /// part of a run (an operand or a parenthesis).
    #[must_use]
    pub fn current_trailing_run(&self) -> Option<NumericRun<'_>> {
        let start = self
            .text
            .char_indices()
            .rev()
            .take_while(|&(_, c)| is_run_char(c))
            .last()
            .map(|(i, _)| i)?;
        Some(NumericRun {
            text: &self.text[start..],
            start,
        })
    }

    /// All maximal numeric runs, left to right
    pub fn numeric_runs(&self) -> impl Iterator<Item = NumericRun<'_>> + '_ {
        let text = self.text.as_str();
        let mut pos = 0;
        std::iter::from_fn(move || {
            let rest = &text[pos..];
            let offset = rest.find(is_run_char)?;
            let start = pos + offset;
            let len = text[start..]
                .find(|c: char| !is_run_char(c))
                .unwrap_or(text.len() - start);
            pos = start + len;
            Some(NumericRun {
                text: &text[start..pos],
                start,
            })
        })
    }

    /// The literal text when the whole expression is one number
    ///
    /// A single leading `-` is accepted as the literal's sign since it is
    /// unary negation, not a binary operand. `-5` is therefore a literal
    /// even though it contains the `-` symbol; `5-` and `--5` are not.
    #[must_use]
    pub fn single_literal(&self) -> Option<&str> {
        let unsigned = self.text.strip_prefix('-').unwrap_or(&self.text);
        if !unsigned.is_empty() && unsigned.chars().all(is_run_char) {
            Some(&self.text)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}
