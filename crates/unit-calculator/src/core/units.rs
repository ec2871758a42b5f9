//! Base unit and its two fixed-ratio sub-units
//!
//! The canonical result is always held in [`Unit::Base`]. A value typed
//! while a sub-unit is selected is divided by that unit's scale.

use crate::core::expression::Expression;
use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Display denomination of the same underlying quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Unit {
    /// The base unit (Eth)
    #[default]
    #[serde(rename = "eth", alias = "base")]
    Base,
    /// Base × 10^9 (Gwei)
    #[serde(rename = "gwei", alias = "milli9")]
    Milli9,
    /// Base × 10^18 (Wei)
    #[serde(rename = "wei", alias = "milli18")]
    Milli18,
}

impl Unit {
    /// All units, largest first
    pub const ALL: [Self; 3] = [Self::Base, Self::Milli9, Self::Milli18];

    /// How many of this unit make one base unit
    #[must_use]
    pub const fn scale(self) -> f64 {
        match self {
            Self::Base => 1.0,
            Self::Milli9 => 1e9,
            Self::Milli18 => 1e18,
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Base => "Eth",
            Self::Milli9 => "Gwei",
            Self::Milli18 => "Wei",
        }
    }

    /// Maximum fractional digits shown for this unit
    #[must_use]
    pub const fn max_fraction_digits(self) -> usize {
        match self {
            Self::Base => 18,
            Self::Milli9 => 9,
            Self::Milli18 => 0,
        }
    }

    /// Converts a value expressed in this unit into base units
    #[must_use]
    pub fn to_base(self, value: f64) -> f64 {
        value / self.scale()
    }

    /// Converts a base-unit value into this unit
    #[must_use]
    pub fn from_base(self, base: f64) -> f64 {
        base * self.scale()
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eth" | "base" => Ok(Self::Base),
            "gwei" | "milli9" => Ok(Self::Milli9),
            "wei" | "milli18" => Ok(Self::Milli18),
            _ => Err(CalcError::UnknownUnit(s.to_string())),
        }
    }
}

/// Canonical base-unit result for a value evaluated under `selected`
#[must_use]
pub fn to_base(value: f64, selected: Unit) -> f64 {
    selected.to_base(value)
}

/// Reinterprets a bare literal when the selected unit changes
///
/// Returns the new base-unit result when the expression is exactly one
/// number, `None` when the result must stay as it is (empty expression,
/// any operator, or a literal that does not parse).
#[must_use]
pub fn on_unit_change(new_unit: Unit, expression: &Expression) -> Option<f64> {
    let literal = expression.single_literal()?;
    let value = parse_literal(literal).ok()?;
    Some(to_base(value, new_unit))
}

/// Parses a bare decimal literal (optionally signed)
pub fn parse_literal(literal: &str) -> CalcResult<f64> {
    literal
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CalcError::malformed(format!("invalid number '{literal}'")))
}

/// A base-unit value expressed in every unit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UnitValues {
    /// Value in base units
    pub base: f64,
    /// Value in Milli9 units
    pub milli9: f64,
    /// Value in Milli18 units
    pub milli18: f64,
}

impl UnitValues {
    /// Derives the triple from a base-unit value
    #[must_use]
    pub fn from_base(base: f64) -> Self {
        Self {
            base,
            milli9: Unit::Milli9.from_base(base),
            milli18: Unit::Milli18.from_base(base),
        }
    }

    /// The value in `unit`
    #[must_use]
    pub const fn get(&self, unit: Unit) -> f64 {
        match unit {
            Unit::Base => self.base,
            Unit::Milli9 => self.milli9,
            Unit::Milli18 => self.milli18,
        }
    }

    /// `(unit, value)` pairs, largest unit first
    pub fn iter(&self) -> impl Iterator<Item = (Unit, f64)> + '_ {
        Unit::ALL.into_iter().map(|u| (u, self.get(u)))
    }
}
