//! Appointment persistence port.

use async_trait::async_trait;

use crate::domain::clinic::Appointment;
use crate::domain::foundation::{AppointmentId, DomainError, OwnerId};

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &AppointmentId,
    ) -> Result<Option<Appointment>, DomainError>;

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Appointment>, DomainError>;

    async fn create(&self, appointment: &Appointment) -> Result<(), DomainError>;

    /// Updates the row only when the stored version matches
    /// `appointment.version`, bumping it by one. Fails with `Conflict` on a
    /// lost update.
    async fn update_versioned(&self, appointment: &Appointment) -> Result<(), DomainError>;

    /// Hard delete; the derived income entry (if any) goes with it in the
    /// same transaction.
    async fn delete(&self, owner_id: &OwnerId, id: &AppointmentId) -> Result<(), DomainError>;
}
