//! Tenant ownership trait for owner-scoped resources.
//!
//! Every top-level clinic record (patient, dentist, procedure, appointment,
//! ledger entry) belongs to exactly one owner. Repositories scope queries by
//! owner; this trait is the second line of defense at the aggregate level.

use super::{DomainError, ErrorCode, OwnerId};

/// Trait for aggregates owned by a single tenant.
pub trait OwnedByTenant {
    /// Returns the owner of this resource.
    fn owner_id(&self) -> &OwnerId;

    /// Checks if the given owner owns this resource.
    fn is_owned_by(&self, owner_id: &OwnerId) -> bool {
        self.owner_id() == owner_id
    }

    /// Validates ownership, returning `Forbidden` if the owner does not match.
    ///
    /// A mismatch here should be impossible when repository queries are
    /// correctly owner-scoped, so it is also logged as a bug signal.
    fn check_ownership(&self, owner_id: &OwnerId) -> Result<(), DomainError> {
        if self.is_owned_by(owner_id) {
            Ok(())
        } else {
            tracing::error!(
                owner = %self.owner_id(),
                requested_by = %owner_id,
                "cross-tenant access attempt reached the domain layer"
            );
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Record belongs to another account",
            )
            .with_detail("owner_id", self.owner_id().to_string())
            .with_detail("requested_by", owner_id.to_string()))
        }
    }
}
