//! Subscription persistence port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OwnerId, SubscriptionId};
use crate::domain::subscription::Subscription;

/// Repository for the one-per-owner subscription row.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Finds the owner's subscription, `None` when the owner never had one.
    async fn find_by_owner(&self, owner_id: &OwnerId)
        -> Result<Option<Subscription>, DomainError>;

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError>;

    /// Inserts a new subscription. Fails with `Conflict` when the owner
    /// already has one (unique owner_id).
    async fn create(&self, subscription: &Subscription) -> Result<(), DomainError>;

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError>;
}
