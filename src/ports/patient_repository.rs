//! Patient persistence port.

use async_trait::async_trait;

use crate::domain::clinic::Patient;
use crate::domain::foundation::{DomainError, OwnerId, PatientId};

#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Finds a patient scoped to the owner.
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &PatientId,
    ) -> Result<Option<Patient>, DomainError>;

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Patient>, DomainError>;

    /// Inserts a patient. Fails with `Conflict` when the owner already has a
    /// patient with the same tax id.
    async fn create(&self, patient: &Patient) -> Result<(), DomainError>;

    async fn update(&self, patient: &Patient) -> Result<(), DomainError>;

    async fn delete(&self, owner_id: &OwnerId, id: &PatientId) -> Result<(), DomainError>;
}
