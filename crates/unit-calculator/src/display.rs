//! Display derivation for the unit triple
//!
//! Renders numbers the way an en-US number formatter does: thousands
//! separators, rounding half away from zero to a maximum number of
//! fractional digits, trailing zeros trimmed. Rounding works on the
//! shortest round-trip decimal digits of the value, so `0.1` stays `0.1`
//! and never becomes `0.100000000000000006`.

use crate::core::units::{Unit, UnitValues};
use serde::{Deserialize, Serialize};

/// Formats `value` with grouping and at most `max_fraction_digits` decimals
#[must_use]
pub fn format_grouped(value: f64, max_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let digits = value.abs().to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

    let (int_part, frac_part) = round_digits(int_part, frac_part, max_fraction_digits);
    let frac_part = frac_part.trim_end_matches('0');

    let negative = value.is_sign_negative()
        && (int_part.bytes().any(|b| b != b'0') || !frac_part.is_empty());

    let mut out = String::with_capacity(int_part.len() + frac_part.len() + 8);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Rounds a decimal digit string to `max_frac` fractional digits
fn round_digits(int_part: &str, frac_part: &str, max_frac: usize) -> (String, String) {
    if frac_part.len() <= max_frac {
        return (int_part.to_string(), frac_part.to_string());
    }

    let round_up = frac_part.as_bytes()[max_frac] >= b'5';
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(max_frac))
        .collect();

    if round_up {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - max_frac;
    let frac = String::from_utf8_lossy(&kept[split..]).into_owned();
    let int = String::from_utf8_lossy(&kept[..split]).into_owned();
    (int, frac)
}

/// Inserts `,` every three digits from the right
fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// The unit triple rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormattedUnitValues {
    /// Base units, up to 18 fractional digits
    pub base: String,
    /// Milli9 units, up to 9 fractional digits
    pub milli9: String,
    /// Milli18 units, no fractional digits
    pub milli18: String,
}

impl FormattedUnitValues {
    /// Formats each member of the triple with its unit's digit cap
    #[must_use]
    pub fn from_values(values: &UnitValues) -> Self {
        let fmt = |unit: Unit| format_grouped(values.get(unit), unit.max_fraction_digits());
        Self {
            base: fmt(Unit::Base),
            milli9: fmt(Unit::Milli9),
            milli18: fmt(Unit::Milli18),
        }
    }

    /// The string for `unit`
    #[must_use]
    pub fn get(&self, unit: Unit) -> &str {
        match unit {
            Unit::Base => &self.base,
            Unit::Milli9 => &self.milli9,
            Unit::Milli18 => &self.milli18,
        }
    }

    /// `"<value> <label>"` lines, largest unit first
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        Unit::ALL
            .iter()
            .map(|&unit| format!("{} {}", self.get(unit), unit.label()))
            .collect()
    }
}

impl From<UnitValues> for FormattedUnitValues {
    fn from(values: UnitValues) -> Self {
        Self::from_values(&values)
    }
}
