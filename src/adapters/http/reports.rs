//! HTTP handlers for downloadable reports.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::adapters::export::{dentist_production_csv, dentist_production_filename};
use crate::application::handlers::cashflow::GetDentistProductionQuery;
use crate::domain::foundation::DomainError;
use crate::ports::ReportRange;

use super::error::ApiError;
use super::middleware::RequireTenant;
use super::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProductionParams {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Defaults to the current calendar month when no range is given.
fn resolve_range(params: ProductionParams) -> Result<ReportRange, DomainError> {
    let today = chrono::Utc::now().date_naive();
    let default_start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .ok_or_else(|| DomainError::validation("start", "Date out of range"))?;

    Ok(ReportRange {
        start: params.start.unwrap_or(default_start),
        end: params.end.unwrap_or(today),
    })
}

/// GET /api/reports/dentist-production.csv?start=&end=
pub async fn dentist_production_report(
    State(state): State<AppState>,
    RequireTenant(owner_id): RequireTenant,
    Query(params): Query<ProductionParams>,
) -> Result<impl IntoResponse, ApiError> {
    let range = resolve_range(params).map_err(ApiError)?;

    let rows = state
        .get_dentist_production_handler()
        .handle(GetDentistProductionQuery { owner_id, range })
        .await?;

    let body = dentist_production_csv(&rows);
    let filename = dentist_production_filename(range.start, range.end);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}
