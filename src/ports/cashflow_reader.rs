//! Read-side port for cash-flow reports.
//!
//! Aggregation happens in SQL; handlers just forward ranges.

use async_trait::async_trait;

use crate::domain::cashflow::{
    CashFlowSummary, CategoryBreakdown, DentistProductionRow, MonthlySeries,
};
use crate::domain::foundation::{DomainError, OwnerId};

/// Inclusive date range for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    pub start: chrono::NaiveDate,
    pub end: chrono::NaiveDate,
}

#[async_trait]
pub trait CashFlowReader: Send + Sync {
    /// Null-safe income/expense totals over the range.
    async fn summary(
        &self,
        owner_id: &OwnerId,
        range: ReportRange,
    ) -> Result<CashFlowSummary, DomainError>;

    /// Twelve monthly points for the year, zero-filled.
    async fn monthly_series(
        &self,
        owner_id: &OwnerId,
        year: i32,
    ) -> Result<MonthlySeries, DomainError>;

    /// Expense totals grouped by category, descending.
    async fn expense_breakdown(
        &self,
        owner_id: &OwnerId,
        range: ReportRange,
    ) -> Result<Vec<CategoryBreakdown>, DomainError>;

    /// Income totals grouped by origin, descending.
    async fn income_breakdown(
        &self,
        owner_id: &OwnerId,
        range: ReportRange,
    ) -> Result<Vec<CategoryBreakdown>, DomainError>;

    /// Per-dentist revenue and commission over the range, highest revenue
    /// first.
    async fn dentist_production(
        &self,
        owner_id: &OwnerId,
        range: ReportRange,
    ) -> Result<Vec<DentistProductionRow>, DomainError>;
}
