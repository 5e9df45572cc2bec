//! Percentage value object (0-100 scale, fractional values allowed).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A decimal value between 0 and 100 inclusive.
///
/// Discounts and commission rates are stored with two decimal places in the
/// database, so this wraps a `Decimal` rather than an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(Decimal::ONE_HUNDRED);

    /// Creates a Percentage, returning an error if out of range.
    pub fn try_new(value: Decimal) -> Result<Self, ValidationError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(ValidationError::out_of_range(
                "percentage",
                0,
                100,
                value.to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Creates a Percentage, clamping to the valid range.
    pub fn clamped(value: Decimal) -> Self {
        Self(value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    /// Returns the inner decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the value as a fraction (0 to 1).
    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
