//! PostgreSQL implementation of CashFlowReader.
//!
//! All aggregation runs in SQL. COALESCE keeps empty ledgers returning
//! zeros instead of NULLs.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::cashflow::{
    CashFlowSummary, CategoryBreakdown, DentistProductionRow, MonthlySeries,
};
use crate::domain::foundation::{DomainError, Money, OwnerId};
use crate::ports::{CashFlowReader, ReportRange};

use super::db_error;

pub struct PostgresCashFlowReader {
    pool: PgPool,
}

impl PostgresCashFlowReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CashFlowReader for PostgresCashFlowReader {
    async fn summary(
        &self,
        owner_id: &OwnerId,
        range: ReportRange,
    ) -> Result<CashFlowSummary, DomainError> {
        let (total_income, total_expense): (Decimal, Decimal) = sqlx::query_as(
            r#"
            SELECT
                COALESCE((SELECT SUM(amount) FROM incomes
                          WHERE owner_id = $1 AND date BETWEEN $2 AND $3), 0),
                COALESCE((SELECT SUM(amount) FROM expenses
                          WHERE owner_id = $1 AND date BETWEEN $2 AND $3), 0)
            "#,
        )
        .bind(owner_id.as_uuid())
        .bind(range.start)
        .bind(range.end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to compute cash flow summary", e))?;

        Ok(CashFlowSummary::new(
            Money::from_decimal(total_income),
            Money::from_decimal(total_expense),
        ))
    }

    async fn monthly_series(
        &self,
        owner_id: &OwnerId,
        year: i32,
    ) -> Result<MonthlySeries, DomainError> {
        let rows: Vec<(i32, Decimal, Decimal)> = sqlx::query_as(
            r#"
            SELECT month::int, COALESCE(SUM(income), 0), COALESCE(SUM(expense), 0)
            FROM (
                SELECT EXTRACT(MONTH FROM date) AS month, amount AS income, 0 AS expense
                FROM incomes
                WHERE owner_id = $1 AND EXTRACT(YEAR FROM date) = $2
                UNION ALL
                SELECT EXTRACT(MONTH FROM date) AS month, 0 AS income, amount AS expense
                FROM expenses
                WHERE owner_id = $1 AND EXTRACT(YEAR FROM date) = $2
            ) entries
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(owner_id.as_uuid())
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to compute monthly series", e))?;

        let sums: Vec<(u32, Money, Money)> = rows
            .into_iter()
            .map(|(month, income, expense)| {
                (
                    month as u32,
                    Money::from_decimal(income),
                    Money::from_decimal(expense),
                )
            })
            .collect();

        Ok(MonthlySeries::from_sparse(year, &sums))
    }

    async fn expense_breakdown(
        &self,
        owner_id: &OwnerId,
        range: ReportRange,
    ) -> Result<Vec<CategoryBreakdown>, DomainError> {
        let rows: Vec<(String, Decimal)> = sqlx::query_as(
            r#"
            SELECT category, COALESCE(SUM(amount), 0) AS total
            FROM expenses
            WHERE owner_id = $1 AND date BETWEEN $2 AND $3
            GROUP BY category
            ORDER BY total DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to compute expense breakdown", e))?;

        Ok(rows
            .into_iter()
            .map(|(label, total)| CategoryBreakdown {
                label,
                total: Money::from_decimal(total),
            })
            .collect())
    }

    async fn income_breakdown(
        &self,
        owner_id: &OwnerId,
        range: ReportRange,
    ) -> Result<Vec<CategoryBreakdown>, DomainError> {
        let rows: Vec<(String, Decimal)> = sqlx::query_as(
            r#"
            SELECT origin, COALESCE(SUM(amount), 0) AS total
            FROM incomes
            WHERE owner_id = $1 AND date BETWEEN $2 AND $3
            GROUP BY origin
            ORDER BY total DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to compute income breakdown", e))?;

        Ok(rows
            .into_iter()
            .map(|(label, total)| CategoryBreakdown {
                label,
                total: Money::from_decimal(total),
            })
            .collect())
    }

    async fn dentist_production(
        &self,
        owner_id: &OwnerId,
        range: ReportRange,
    ) -> Result<Vec<DentistProductionRow>, DomainError> {
        let rows: Vec<(String, i64, Decimal, Decimal)> = sqlx::query_as(
            r#"
            SELECT d.name,
                   COUNT(a.id),
                   COALESCE(SUM(a.final_price), 0) AS revenue,
                   COALESCE(SUM(a.commission_amount), 0)
            FROM appointments a
            JOIN dentists d ON d.id = a.dentist_id
            WHERE a.owner_id = $1
              AND a.scheduled_at::date BETWEEN $2 AND $3
            GROUP BY d.name
            ORDER BY revenue DESC
            "#,
        )
        .bind(owner_id.as_uuid())
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to compute dentist production", e))?;

        Ok(rows
            .into_iter()
            .map(|(name, count, revenue, commission)| {
                DentistProductionRow::new(
                    name,
                    count,
                    Money::from_decimal(revenue),
                    Money::from_decimal(commission),
                )
            })
            .collect())
    }
}
