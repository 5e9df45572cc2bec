//! Payment aggregate entity.
//!
//! One row per checkout attempt. Status moves strictly
//! pending -> {paid | failed | cancelled}; terminal states absorb replayed
//! webhook notifications as no-ops, never as errors.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    Money, PaymentId, StateMachine, SubscriptionId, Timestamp,
};

/// How the payer settled (or intends to settle) the charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Pix,
    Card,
    Boleto,
    Unknown,
}

impl PaymentMethod {
    /// Derive the method from the provider's `payment_method_id` string.
    ///
    /// The provider reports concrete brands ("visa", "master", ...); we only
    /// keep the coarse category.
    pub fn from_provider_id(method_id: &str) -> Self {
        let id = method_id.to_lowercase();
        if id.contains("pix") {
            PaymentMethod::Pix
        } else if ["visa", "master", "amex", "hiper", "elo"]
            .iter()
            .any(|brand| id.contains(brand))
        {
            PaymentMethod::Card
        } else if id.contains("boleto") {
            PaymentMethod::Boleto
        } else {
            PaymentMethod::Unknown
        }
    }

    /// Stable string code used in the database.
    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "pix",
            PaymentMethod::Card => "card",
            PaymentMethod::Boleto => "boleto",
            PaymentMethod::Unknown => "unknown",
        }
    }
}

/// Lifecycle status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Cancelled,
}

impl PaymentStatus {
    /// Stable string code used in the database.
    pub fn code(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Cancelled => "cancelled",
        }
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, target),
            (Pending, Paid) | (Pending, Failed) | (Pending, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Pending => vec![Paid, Failed, Cancelled],
            Paid | Failed | Cancelled => vec![],
        }
    }
}

/// Payment aggregate - one gateway transaction for a subscription.
///
/// # Invariants
///
/// - `external_reference` is globally unique (webhook idempotency key)
/// - Status transitions follow [`PaymentStatus`]'s state machine
/// - Rows are never deleted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,

    /// Subscription this payment renews.
    pub subscription_id: SubscriptionId,

    /// Unique reference sent to the gateway as `external_reference`.
    pub external_reference: String,

    /// Plan code at the time of checkout ("professional" etc.).
    pub plan_label: String,

    pub amount: Money,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub created_at: Timestamp,

    /// Set once, when the gateway first reports the payment as approved.
    pub paid_at: Option<Timestamp>,

    /// Last raw provider payload, kept for audit/replay.
    pub raw_payload: Option<serde_json::Value>,
}

impl Payment {
    /// Create a pending payment at checkout initiation.
    pub fn new_pending(
        subscription_id: SubscriptionId,
        external_reference: String,
        plan_label: String,
        amount: Money,
        now: Timestamp,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            subscription_id,
            external_reference,
            plan_label,
            amount,
            method: PaymentMethod::Unknown,
            status: PaymentStatus::Pending,
            created_at: now,
            paid_at: None,
            raw_payload: None,
        }
    }

    /// Mark as paid. Returns `true` only when the transition actually
    /// happened, so callers extend the subscription at most once even under
    /// webhook replay.
    pub fn mark_paid(&mut self, now: Timestamp) -> bool {
        if self.status == PaymentStatus::Paid {
            return false;
        }
        match self.status.transition_to(PaymentStatus::Paid) {
            Ok(next) => {
                self.status = next;
                self.paid_at = Some(now);
                true
            }
            // Failed/cancelled payments stay terminal; a late approval is
            // recorded in raw_payload only.
            Err(_) => false,
        }
    }

    /// Mark as failed. No-op when already terminal.
    pub fn mark_failed(&mut self) -> bool {
        match self.status.transition_to(PaymentStatus::Failed) {
            Ok(next) => {
                self.status = next;
                true
            }
            Err(_) => false,
        }
    }

    /// Store the latest raw provider payload and derived method.
    pub fn record_provider_data(&mut self, method: PaymentMethod, payload: serde_json::Value) {
        self.method = method;
        self.raw_payload = Some(payload);
    }
}
