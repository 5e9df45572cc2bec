//! GetCashFlowHandler - totals and breakdowns over a month.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::domain::cashflow::{CashFlowSummary, CategoryBreakdown};
use crate::domain::foundation::{DomainError, OwnerId};
use crate::ports::{CashFlowReader, ReportRange};

#[derive(Debug, Clone)]
pub struct GetCashFlowQuery {
    pub owner_id: OwnerId,

    /// Defaults to the current month when absent.
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct CashFlowReport {
    pub summary: CashFlowSummary,
    pub expense_breakdown: Vec<CategoryBreakdown>,
    pub income_breakdown: Vec<CategoryBreakdown>,
    pub range: ReportRange,
}

pub struct GetCashFlowHandler {
    reader: Arc<dyn CashFlowReader>,
}

impl GetCashFlowHandler {
    pub fn new(reader: Arc<dyn CashFlowReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetCashFlowQuery) -> Result<CashFlowReport, DomainError> {
        let today = chrono::Utc::now().date_naive();
        let year = query.year.unwrap_or_else(|| today.year());
        let month = query.month.unwrap_or_else(|| today.month());
        if !(1..=12).contains(&month) {
            return Err(DomainError::validation("month", "Month must be 1-12"));
        }

        let range = month_range(year, month)
            .ok_or_else(|| DomainError::validation("year", "Date out of range"))?;

        let summary = self.reader.summary(&query.owner_id, range).await?;
        let expense_breakdown = self.reader.expense_breakdown(&query.owner_id, range).await?;
        let income_breakdown = self.reader.income_breakdown(&query.owner_id, range).await?;

        Ok(CashFlowReport {
            summary,
            expense_breakdown,
            income_breakdown,
            range,
        })
    }
}

/// First and last day of the given month.
fn month_range(year: i32, month: u32) -> Option<ReportRange> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(ReportRange {
        start,
        end: next_month.pred_opt()?,
    })
}
