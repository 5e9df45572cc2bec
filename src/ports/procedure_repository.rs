//! Procedure catalog persistence port.

use async_trait::async_trait;

use crate::domain::clinic::Procedure;
use crate::domain::foundation::{DomainError, OwnerId, ProcedureId};

#[async_trait]
pub trait ProcedureRepository: Send + Sync {
    async fn find_by_id(
        &self,
        owner_id: &OwnerId,
        id: &ProcedureId,
    ) -> Result<Option<Procedure>, DomainError>;

    async fn list(&self, owner_id: &OwnerId) -> Result<Vec<Procedure>, DomainError>;

    async fn create(&self, procedure: &Procedure) -> Result<(), DomainError>;

    async fn update(&self, procedure: &Procedure) -> Result<(), DomainError>;
}
