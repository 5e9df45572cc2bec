//! EvaluateSubscriptionHandler - entitlement state for a tenant.
//!
//! Called by the access gate on every gated request and by the subscription
//! endpoint. Always a fresh read; entitlement is never cached.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, OwnerId, Timestamp};
use crate::domain::subscription::SubscriptionStatus;
use crate::ports::SubscriptionRepository;

#[derive(Debug, Clone)]
pub struct EvaluateSubscriptionQuery {
    pub owner_id: OwnerId,
}

pub struct EvaluateSubscriptionHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl EvaluateSubscriptionHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    pub async fn handle(
        &self,
        query: EvaluateSubscriptionQuery,
    ) -> Result<SubscriptionStatus, DomainError> {
        let subscription = self.subscriptions.find_by_owner(&query.owner_id).await?;

        if subscription.is_none() {
            // Registration always creates a trial, so a missing row is a bug
            // signal; access still fails closed via the Missing status.
            tracing::error!(
                owner_id = %query.owner_id,
                "authenticated owner has no subscription row"
            );
        }

        Ok(SubscriptionStatus::evaluate(
            subscription.as_ref(),
            Timestamp::now(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::subscription::test_support::InMemorySubscriptions;
    use crate::domain::subscription::{Classification, Subscription};

    #[tokio::test]
    async fn active_trial_is_entitled() {
        let owner = OwnerId::new();
        let subscription = Subscription::start_trial(owner, Timestamp::now());
        let handler = EvaluateSubscriptionHandler::new(Arc::new(InMemorySubscriptions::with(
            subscription,
        )));

        let status = handler
            .handle(EvaluateSubscriptionQuery { owner_id: owner })
            .await
            .unwrap();

        match status {
            SubscriptionStatus::Entitled {
                classification,
                days_remaining,
                ..
            } => {
                assert_eq!(classification, Classification::Trial);
                assert_eq!(days_remaining, 7);
            }
            other => panic!("expected entitled, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_subscription_fails_closed() {
        let handler =
            EvaluateSubscriptionHandler::new(Arc::new(InMemorySubscriptions::default()));

        let status = handler
            .handle(EvaluateSubscriptionQuery {
                owner_id: OwnerId::new(),
            })
            .await
            .unwrap();

        assert_eq!(status, SubscriptionStatus::Missing);
        assert!(!status.is_entitled());
    }
}
