//! Cash-flow queries. Thin: the reader port does the aggregation in SQL.

mod dentist_production;
mod get_cash_flow;
mod monthly_series;

pub use dentist_production::{GetDentistProductionHandler, GetDentistProductionQuery};
pub use get_cash_flow::{CashFlowReport, GetCashFlowHandler, GetCashFlowQuery};
pub use monthly_series::{GetMonthlySeriesHandler, GetMonthlySeriesQuery, MonthlyReport};
