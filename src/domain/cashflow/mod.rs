//! Cash-flow ledger - income and expense entries plus report shapes.
//!
//! Entries come from two places: manual bookkeeping and the derived income
//! created when an appointment is marked paid. Reports are computed in SQL by
//! the cash-flow reader adapter; this module only defines the shapes.

mod entry;
mod report;

pub use entry::{Expense, ExpenseCategory, Income, IncomeOrigin};
pub use report::{
    CashFlowSummary, CategoryBreakdown, DentistProductionRow, MonthlyPoint, MonthlySeries,
};
