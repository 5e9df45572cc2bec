//! GetMonthlySeriesHandler - the year-at-a-glance chart data.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::cashflow::{CategoryBreakdown, MonthlySeries};
use crate::domain::foundation::{DomainError, OwnerId};
use crate::ports::{CashFlowReader, ReportRange};

#[derive(Debug, Clone)]
pub struct GetMonthlySeriesQuery {
    pub owner_id: OwnerId,
    pub year: i32,
}

#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub series: MonthlySeries,
    pub expense_breakdown: Vec<CategoryBreakdown>,
    pub income_breakdown: Vec<CategoryBreakdown>,
}

pub struct GetMonthlySeriesHandler {
    reader: Arc<dyn CashFlowReader>,
}

impl GetMonthlySeriesHandler {
    pub fn new(reader: Arc<dyn CashFlowReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetMonthlySeriesQuery,
    ) -> Result<MonthlyReport, DomainError> {
        let year_range = ReportRange {
            start: NaiveDate::from_ymd_opt(query.year, 1, 1)
                .ok_or_else(|| DomainError::validation("year", "Year out of range"))?,
            end: NaiveDate::from_ymd_opt(query.year, 12, 31)
                .ok_or_else(|| DomainError::validation("year", "Year out of range"))?,
        };

        let series = self.reader.monthly_series(&query.owner_id, query.year).await?;
        let expense_breakdown = self
            .reader
            .expense_breakdown(&query.owner_id, year_range)
            .await?;
        let income_breakdown = self
            .reader
            .income_breakdown(&query.owner_id, year_range)
            .await?;

        Ok(MonthlyReport {
            series,
            expense_breakdown,
            income_breakdown,
        })
    }
}
