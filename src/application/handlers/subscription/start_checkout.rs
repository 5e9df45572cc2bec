//! StartCheckoutHandler - opens a gateway checkout for a paid plan.
//!
//! The pending payment row is written before the gateway call, so even when
//! the provider times out the reference exists for later reconciliation.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::billing::Payment;
use crate::domain::foundation::{DomainError, ErrorCode, Money, OwnerId, Timestamp};
use crate::domain::subscription::PlanTier;
use crate::ports::{PaymentGateway, PaymentRepository, SubscriptionRepository};

/// Price table for the paid plans, loaded from configuration.
#[derive(Debug, Clone, Copy)]
pub struct PlanPricing {
    pub basic: Money,
    pub professional: Money,
    pub premium: Money,
}

impl PlanPricing {
    /// Price of a purchasable plan; `None` for the trial tier.
    pub fn price_for(&self, plan: PlanTier) -> Option<Money> {
        match plan {
            PlanTier::Trial => None,
            PlanTier::Basic => Some(self.basic),
            PlanTier::Professional => Some(self.professional),
            PlanTier::Premium => Some(self.premium),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StartCheckoutCommand {
    pub owner_id: OwnerId,
    pub plan: PlanTier,
}

/// Result handed back to the HTTP layer for the browser redirect.
#[derive(Debug, Clone)]
pub struct CheckoutStarted {
    pub checkout_url: String,
    pub external_reference: String,
}

pub struct StartCheckoutHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    payments: Arc<dyn PaymentRepository>,
    gateway: Arc<dyn PaymentGateway>,
    pricing: PlanPricing,
}

impl StartCheckoutHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        payments: Arc<dyn PaymentRepository>,
        gateway: Arc<dyn PaymentGateway>,
        pricing: PlanPricing,
    ) -> Self {
        Self {
            subscriptions,
            payments,
            gateway,
            pricing,
        }
    }

    pub async fn handle(&self, cmd: StartCheckoutCommand) -> Result<CheckoutStarted, DomainError> {
        let amount = self.pricing.price_for(cmd.plan).ok_or_else(|| {
            DomainError::validation("plan", "Plan is not purchasable")
        })?;

        let subscription = self
            .subscriptions
            .find_by_owner(&cmd.owner_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::SubscriptionNotFound, "Subscription not found")
            })?;

        let external_reference = format!("clinicore-{}-{}", cmd.owner_id, Uuid::new_v4());
        // plan_label is parsed back into a tier at reconciliation time, so
        // the stable code goes into the row, not the display name.
        let payment = Payment::new_pending(
            subscription.id,
            external_reference.clone(),
            cmd.plan.code().to_string(),
            amount,
            Timestamp::now(),
        );
        self.payments.create(&payment).await?;

        let preference = self
            .gateway
            .create_preference(&external_reference, cmd.plan.display_name(), amount)
            .await
            .map_err(|e| {
                tracing::warn!(
                    owner_id = %cmd.owner_id,
                    error = %e,
                    "checkout preference creation failed, payment row stays pending"
                );
                DomainError::new(
                    ErrorCode::ExternalServiceError,
                    "Payment provider unavailable, try again",
                )
            })?;

        tracing::info!(
            owner_id = %cmd.owner_id,
            plan = cmd.plan.code(),
            external_reference = %external_reference,
            "checkout started"
        );
        Ok(CheckoutStarted {
            checkout_url: preference.checkout_url,
            external_reference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::subscription::test_support::{
        InMemoryPayments, InMemorySubscriptions, StubGateway,
    };
    use crate::domain::billing::PaymentStatus;
    use crate::domain::subscription::Subscription;

    fn money(s: &str) -> Money {
        Money::try_new(s.parse().unwrap()).unwrap()
    }

    fn pricing() -> PlanPricing {
        PlanPricing {
            basic: money("49.90"),
            professional: money("79.90"),
            premium: money("129.90"),
        }
    }

    #[tokio::test]
    async fn checkout_creates_pending_payment_and_returns_redirect() {
        let owner = OwnerId::new();
        let subscription = Subscription::start_trial(owner, Timestamp::now());
        let payments = Arc::new(InMemoryPayments::default());

        let handler = StartCheckoutHandler::new(
            Arc::new(InMemorySubscriptions::with(subscription)),
            payments.clone(),
            Arc::new(StubGateway::healthy()),
            pricing(),
        );

        let started = handler
            .handle(StartCheckoutCommand {
                owner_id: owner,
                plan: PlanTier::Professional,
            })
            .await
            .unwrap();

        assert!(started.checkout_url.starts_with("https://gateway.test/"));
        assert!(started
            .external_reference
            .starts_with(&format!("clinicore-{owner}-")));

        let payment = payments.by_reference(&started.external_reference).unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.amount, money("79.90"));
        assert_eq!(payment.plan_label, "professional");
    }

    #[tokio::test]
    async fn trial_plan_is_not_purchasable() {
        let owner = OwnerId::new();
        let subscription = Subscription::start_trial(owner, Timestamp::now());
        let handler = StartCheckoutHandler::new(
            Arc::new(InMemorySubscriptions::with(subscription)),
            Arc::new(InMemoryPayments::default()),
            Arc::new(StubGateway::healthy()),
            pricing(),
        );

        let err = handler
            .handle(StartCheckoutCommand {
                owner_id: owner,
                plan: PlanTier::Trial,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn gateway_outage_keeps_the_pending_payment() {
        let owner = OwnerId::new();
        let subscription = Subscription::start_trial(owner, Timestamp::now());
        let payments = Arc::new(InMemoryPayments::default());

        let handler = StartCheckoutHandler::new(
            Arc::new(InMemorySubscriptions::with(subscription)),
            payments.clone(),
            Arc::new(StubGateway::failing_preference()),
            pricing(),
        );

        let err = handler
            .handle(StartCheckoutCommand {
                owner_id: owner,
                plan: PlanTier::Basic,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ExternalServiceError);
        // The row survives for webhook reconciliation.
        assert_eq!(payments.count(), 1);
    }
}
