//! GetDentistProductionHandler - per-dentist revenue and commission rows.

use std::sync::Arc;

use crate::domain::cashflow::DentistProductionRow;
use crate::domain::foundation::{DomainError, OwnerId};
use crate::ports::{CashFlowReader, ReportRange};

#[derive(Debug, Clone)]
pub struct GetDentistProductionQuery {
    pub owner_id: OwnerId,
    pub range: ReportRange,
}

pub struct GetDentistProductionHandler {
    reader: Arc<dyn CashFlowReader>,
}

impl GetDentistProductionHandler {
    pub fn new(reader: Arc<dyn CashFlowReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetDentistProductionQuery,
    ) -> Result<Vec<DentistProductionRow>, DomainError> {
        if query.range.end < query.range.start {
            return Err(DomainError::validation(
                "range",
                "End date before start date",
            ));
        }
        self.reader
            .dentist_production(&query.owner_id, query.range)
            .await
    }
}
