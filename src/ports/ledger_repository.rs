//! Cash-flow ledger persistence port.

use async_trait::async_trait;

use crate::domain::cashflow::{Expense, Income};
use crate::domain::foundation::{AppointmentId, DomainError, EntryId, OwnerId};

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Inserts an income entry. For appointment-derived entries, a duplicate
    /// `appointment_id` fails with `Conflict` (partial unique index).
    async fn create_income(&self, income: &Income) -> Result<(), DomainError>;

    async fn create_expense(&self, expense: &Expense) -> Result<(), DomainError>;

    /// Finds the derived income entry for an appointment, if one exists.
    async fn find_income_by_appointment(
        &self,
        owner_id: &OwnerId,
        appointment_id: &AppointmentId,
    ) -> Result<Option<Income>, DomainError>;

    async fn delete_income(&self, owner_id: &OwnerId, id: &EntryId) -> Result<(), DomainError>;

    async fn delete_expense(&self, owner_id: &OwnerId, id: &EntryId) -> Result<(), DomainError>;
}
