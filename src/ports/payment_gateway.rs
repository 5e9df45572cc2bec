//! Payment gateway port.
//!
//! Two calls: create a checkout preference when the owner starts an upgrade,
//! and re-fetch the live payment state during webhook reconciliation. The
//! webhook payload itself is never trusted as a source of payment status.

use async_trait::async_trait;

use crate::domain::billing::ProviderPayment;
use crate::domain::foundation::{DomainError, Money};

/// A checkout session created at the provider.
#[derive(Debug, Clone)]
pub struct CheckoutPreference {
    /// Provider-side preference id.
    pub preference_id: String,

    /// URL the browser is redirected to.
    pub checkout_url: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a checkout preference for one plan charge.
    async fn create_preference(
        &self,
        external_reference: &str,
        plan_label: &str,
        amount: Money,
    ) -> Result<CheckoutPreference, DomainError>;

    /// Fetches the live state of a provider payment by its provider-side id.
    async fn get_payment(&self, provider_payment_id: &str)
        -> Result<ProviderPayment, DomainError>;
}
