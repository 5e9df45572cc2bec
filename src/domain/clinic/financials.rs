//! Money/commission calculator.
//!
//! Pure functions, no I/O. Called synchronously from the Appointment
//! aggregate's create/update path. All arithmetic is exact decimal; each
//! derived field is rounded half-up to 2 decimal places exactly once, so
//! recomputation with unchanged inputs never drifts.

use rust_decimal::Decimal;

use crate::domain::foundation::{Money, Percentage};

/// Derived monetary fields of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Financials {
    /// Price after discount, rounded to currency precision.
    pub final_price: Money,

    /// Dentist's share of the final price; exactly zero without a dentist.
    pub commission_amount: Money,
}

/// Compute final price and commission from the raw price.
///
/// `final_price = raw_price * (1 - discount/100)`,
/// `commission = final_price * commission/100` when a commission rate is
/// present (a dentist is assigned), else exactly 0.
///
/// Negative inputs are a validation error upstream; the value objects make
/// them unrepresentable here.
pub fn compute_financials(
    raw_price: Money,
    discount: Percentage,
    commission: Option<Percentage>,
) -> Financials {
    let final_price = raw_price
        .mul_fraction(Decimal::ONE - discount.as_fraction())
        .round_currency();

    let commission_amount = match commission {
        Some(rate) => final_price.mul_fraction(rate.as_fraction()).round_currency(),
        None => Money::ZERO,
    };

    Financials {
        final_price,
        commission_amount,
    }
}
