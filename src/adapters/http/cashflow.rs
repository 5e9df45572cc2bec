//! HTTP handlers for cash-flow reports.

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::cashflow::{GetCashFlowQuery, GetMonthlySeriesQuery};
use crate::domain::cashflow::{CashFlowSummary, CategoryBreakdown, MonthlySeries};

use super::error::ApiError;
use super::middleware::RequireTenant;
use super::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CashFlowParams {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct CashFlowResponse {
    pub summary: CashFlowSummary,
    pub expense_breakdown: Vec<CategoryBreakdown>,
    pub income_breakdown: Vec<CategoryBreakdown>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// GET /api/cashflow?month=&year= - one month of totals and breakdowns.
pub async fn get_cash_flow(
    State(state): State<AppState>,
    RequireTenant(owner_id): RequireTenant,
    Query(params): Query<CashFlowParams>,
) -> Result<Json<CashFlowResponse>, ApiError> {
    let report = state
        .get_cash_flow_handler()
        .handle(GetCashFlowQuery {
            owner_id,
            month: params.month,
            year: params.year,
        })
        .await?;

    Ok(Json(CashFlowResponse {
        summary: report.summary,
        expense_breakdown: report.expense_breakdown,
        income_breakdown: report.income_breakdown,
        start: report.range.start,
        end: report.range.end,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SeriesParams {
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct MonthlySeriesResponse {
    pub series: MonthlySeries,
    pub expense_breakdown: Vec<CategoryBreakdown>,
    pub income_breakdown: Vec<CategoryBreakdown>,
}

/// GET /api/cashflow/series?year= - twelve zero-filled monthly points.
pub async fn get_monthly_series(
    State(state): State<AppState>,
    RequireTenant(owner_id): RequireTenant,
    Query(params): Query<SeriesParams>,
) -> Result<Json<MonthlySeriesResponse>, ApiError> {
    let year = params
        .year
        .unwrap_or_else(|| chrono::Datelike::year(&chrono::Utc::now().date_naive()));

    let report = state
        .get_monthly_series_handler()
        .handle(GetMonthlySeriesQuery { owner_id, year })
        .await?;

    Ok(Json(MonthlySeriesResponse {
        series: report.series,
        expense_breakdown: report.expense_breakdown,
        income_breakdown: report.income_breakdown,
    }))
}
