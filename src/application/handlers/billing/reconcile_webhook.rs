//! ReconcileWebhookHandler - processes gateway payment notifications.
//!
//! The webhook payload is only a hint. The handler re-fetches the live
//! payment from the provider, resolves the local row by external reference
//! under a row lock, and applies the status transition. Safe under
//! at-least-once delivery and replays: the subscription is extended at most
//! once per payment.

use std::sync::Arc;

use crate::domain::billing::{map_provider_status, PaymentMethod, ReconcileOutcome};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::subscription::PlanTier;
use crate::ports::{PaymentGateway, PaymentRepository, SubscriptionRepository};

#[derive(Debug, Clone)]
pub struct ReconcileWebhookCommand {
    /// Raw JSON body as delivered by the provider.
    pub payload: serde_json::Value,
}

/// How the notification was handled; the webhook endpoint acknowledges all
/// of these with 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookDisposition {
    /// A local payment transitioned (or a replay was absorbed).
    Processed,

    /// Payload carried no provider payment id.
    Ignored,

    /// Provider payment carries no external reference of ours.
    MissingExternalReference,

    /// Reference does not match any local payment.
    UnknownReference,
}

pub struct ReconcileWebhookHandler {
    payments: Arc<dyn PaymentRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl ReconcileWebhookHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            payments,
            subscriptions,
            gateway,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReconcileWebhookCommand,
    ) -> Result<WebhookDisposition, DomainError> {
        let Some(provider_payment_id) = extract_payment_id(&cmd.payload) else {
            tracing::debug!("webhook payload without payment id, ignoring");
            return Ok(WebhookDisposition::Ignored);
        };

        // Never trust the pushed payload; fetch the live state. A provider
        // outage surfaces as an error so the provider retries the delivery.
        let provider_payment = self.gateway.get_payment(&provider_payment_id).await?;

        let Some(external_reference) = provider_payment.external_reference.clone() else {
            tracing::warn!(
                provider_payment_id = %provider_payment_id,
                "provider payment has no external reference"
            );
            return Ok(WebhookDisposition::MissingExternalReference);
        };

        let Some(mut payment) = self
            .payments
            .find_by_reference_for_update(&external_reference)
            .await?
        else {
            tracing::warn!(
                external_reference = %external_reference,
                "webhook for unknown payment reference"
            );
            return Ok(WebhookDisposition::UnknownReference);
        };

        let method = provider_payment
            .payment_method_id
            .as_deref()
            .map(PaymentMethod::from_provider_id)
            .unwrap_or(payment.method);
        payment.record_provider_data(method, cmd.payload);

        let now = Timestamp::now();
        match map_provider_status(&provider_payment.status) {
            ReconcileOutcome::Approve => {
                // mark_paid returns false on replay or after a terminal
                // failure: the subscription is extended at most once.
                if payment.mark_paid(now) {
                    self.extend_subscription(&payment, now).await?;
                    tracing::info!(
                        external_reference = %external_reference,
                        "payment approved, subscription renewed"
                    );
                }
            }
            ReconcileOutcome::Fail => {
                if payment.mark_failed() {
                    tracing::info!(
                        external_reference = %external_reference,
                        status = %provider_payment.status,
                        "payment failed"
                    );
                }
            }
            ReconcileOutcome::KeepPending => {
                tracing::debug!(
                    external_reference = %external_reference,
                    status = %provider_payment.status,
                    "payment still pending at provider"
                );
            }
        }

        self.payments.update(&payment).await?;
        Ok(WebhookDisposition::Processed)
    }

    async fn extend_subscription(
        &self,
        payment: &crate::domain::billing::Payment,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        let mut subscription = self
            .subscriptions
            .find_by_id(&payment.subscription_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SubscriptionNotFound,
                    "Paid payment references a missing subscription",
                )
            })?;

        let plan = payment
            .plan_label
            .parse::<PlanTier>()
            .unwrap_or(PlanTier::Basic);
        subscription.confirm_payment(plan, now);
        self.subscriptions.update(&subscription).await
    }
}

/// Provider notifications come in two shapes: `{"data": {"id": ...}}` and
/// `{"id": ...}`, with the id either a string or a number.
fn extract_payment_id(payload: &serde_json::Value) -> Option<String> {
    let id = payload
        .get("data")
        .and_then(|data| data.get("id"))
        .or_else(|| payload.get("id"))?;
    match id {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
