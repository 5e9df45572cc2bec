//! Report shapes produced by the cash-flow reader.
//!
//! Sums are computed in SQL; these types only carry the results. All totals
//! are null-safe: an empty ledger yields zeros, never missing fields.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Money;

/// Income, expense, and balance over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSummary {
    pub total_income: Money,
    pub total_expense: Money,

    /// Income minus expense. May be negative, so it is a plain decimal
    /// rather than [`Money`].
    pub balance: rust_decimal::Decimal,
}

impl CashFlowSummary {
    pub fn new(total_income: Money, total_expense: Money) -> Self {
        let balance = total_income.amount() - total_expense.amount();
        Self {
            total_income,
            total_expense,
            balance,
        }
    }

    pub fn empty() -> Self {
        Self::new(Money::ZERO, Money::ZERO)
    }
}

/// One month in the yearly series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// 1-based month number.
    pub month: u32,
    pub income: Money,
    pub expense: Money,
}

/// Twelve months of income/expense for one year, months with no entries
/// included as zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub year: i32,
    pub points: Vec<MonthlyPoint>,
}

impl MonthlySeries {
    /// Build a full 12-point series from sparse per-month sums.
    pub fn from_sparse(year: i32, sums: &[(u32, Money, Money)]) -> Self {
        let points = (1..=12)
            .map(|month| {
                let found = sums.iter().find(|(m, _, _)| *m == month);
                match found {
                    Some((_, income, expense)) => MonthlyPoint {
                        month,
                        income: *income,
                        expense: *expense,
                    },
                    None => MonthlyPoint {
                        month,
                        income: Money::ZERO,
                        expense: Money::ZERO,
                    },
                }
            })
            .collect();
        Self { year, points }
    }
}

/// One row of a grouped breakdown (expense category or income origin),
/// ordered by descending total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub label: String,
    pub total: Money,
}

/// Per-dentist production over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DentistProductionRow {
    pub dentist_name: String,
    pub appointment_count: i64,

    /// Sum of appointment final prices.
    pub revenue: Money,

    /// Sum of commission amounts.
    pub commission: Money,

    /// Revenue minus commission, what the clinic keeps.
    pub net: rust_decimal::Decimal,
}

impl DentistProductionRow {
    pub fn new(
        dentist_name: String,
        appointment_count: i64,
        revenue: Money,
        commission: Money,
    ) -> Self {
        let net = revenue.amount() - commission.amount();
        Self {
            dentist_name,
            appointment_count,
            revenue,
            commission,
            net,
        }
    }
}
