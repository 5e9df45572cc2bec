//! Money value object backed by exact decimal arithmetic.
//!
//! All monetary fields in the system (procedure prices, appointment totals,
//! commissions, ledger amounts) use this type. Binary floating point is never
//! used for money; repeated recomputation must not drift.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use super::ValidationError;

/// Non-negative monetary amount with 2-decimal currency precision.
///
/// Rounding is half-up (`MidpointAwayFromZero`), applied once per computed
/// field for financial predictability.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a Money value, rejecting negative amounts.
    pub fn try_new(amount: Decimal) -> Result<Self, ValidationError> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::invalid_format(
                "amount",
                "monetary amounts cannot be negative",
            ));
        }
        Ok(Self(amount))
    }

    /// Creates a Money value from an already-validated decimal.
    ///
    /// For amounts coming out of the database, where the non-negative
    /// constraint is enforced by the schema.
    pub fn from_decimal(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the inner decimal value.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Rounds to 2 decimal places, half-up.
    pub fn round_currency(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Multiplies by a plain decimal factor (e.g. a percentage fraction).
    pub fn mul_fraction(&self, fraction: Decimal) -> Self {
        Self(self.0 * fraction)
    }

    /// True if this amount is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
