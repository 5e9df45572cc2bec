//! RegisterTrialHandler - creates the one-per-owner trial subscription.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, OwnerId, Timestamp};
use crate::domain::subscription::Subscription;
use crate::ports::SubscriptionRepository;

#[derive(Debug, Clone)]
pub struct RegisterTrialCommand {
    pub owner_id: OwnerId,
}

pub struct RegisterTrialHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl RegisterTrialHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    /// Get-or-create semantics: re-registering an owner returns the existing
    /// subscription unchanged, it never resets the trial clock.
    pub async fn handle(&self, cmd: RegisterTrialCommand) -> Result<Subscription, DomainError> {
        if let Some(existing) = self.subscriptions.find_by_owner(&cmd.owner_id).await? {
            return Ok(existing);
        }

        let subscription = Subscription::start_trial(cmd.owner_id, Timestamp::now());
        self.subscriptions.create(&subscription).await?;

        tracing::info!(
            owner_id = %cmd.owner_id,
            period_end = %subscription.period_end,
            "trial subscription created"
        );
        Ok(subscription)
    }
}
