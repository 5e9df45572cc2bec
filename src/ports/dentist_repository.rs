//! Dentist persistence port.

use async_trait::async_trait;

use crate::domain::clinic::Dentist;
use crate::domain::foundation::{DentistId, DomainError, OwnerId};

#[async_trait]
pub trait DentistRepository: Send + Sync {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &DentistId,
    ) -> Result<Option<Dentist>, DomainError>;

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Dentist>, DomainError>;

    /// Inserts a dentist. Fails with `Conflict` on a duplicate license code
    /// for the same owner.
    async fn create(&self, dentist: &Dentist) -> Result<(), DomainError>;

    async fn update(&self, dentist: &Dentist) -> Result<(), DomainError>;
}
