//! Payment persistence port.

use async_trait::async_trait;

use crate::domain::billing::Payment;
use crate::domain::foundation::DomainError;

/// Repository for gateway payment rows.
///
/// The reconcile path needs a row-locked read so two concurrent webhook
/// deliveries for the same payment serialize; `find_by_reference_for_update`
/// plus `update` must run inside the same unit of work supplied by the
/// implementation.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: &Payment) -> Result<(), DomainError>;

    /// Locks and returns the payment with the given external reference, or
    /// `None` when the reference is unknown.
    async fn find_by_reference_for_update(
        &self,
        external_reference: &str,
    ) -> Result<Option<Payment>, DomainError>;

    async fn update(&self, payment: &Payment) -> Result<(), DomainError>;
}
