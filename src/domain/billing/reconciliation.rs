//! Provider status mapping for webhook reconciliation.
//!
//! The gateway notifies with at-least-once delivery and an opaque payload;
//! reconciliation re-fetches the live payment state from the provider and
//! maps it onto local transitions. The mapping itself is pure so it can be
//! tested without any I/O.

use serde::{Deserialize, Serialize};

/// Live payment state fetched from the provider after a webhook ping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderPayment {
    /// Provider-side status string ("approved", "rejected", ...).
    pub status: String,

    /// Our reference, echoed back by the provider. The idempotency key.
    pub external_reference: Option<String>,

    /// Provider's payment method identifier ("pix", "visa", ...).
    pub payment_method_id: Option<String>,
}

/// What reconciliation should do with the local payment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Provider approved the charge: mark paid and renew the subscription.
    Approve,

    /// Provider reports a definitive failure: mark failed.
    Fail,

    /// Anything else ("pending", "in_process", unknown): store the payload
    /// and wait for the next notification.
    KeepPending,
}

/// Map a provider status string onto a local transition.
///
/// Statuses outside the known set are treated as still-pending rather than
/// errors, so new provider statuses never break reconciliation.
pub fn map_provider_status(status: &str) -> ReconcileOutcome {
    match status {
        "approved" => ReconcileOutcome::Approve,
        "rejected" | "cancelled" | "refunded" | "charged_back" => ReconcileOutcome::Fail,
        _ => ReconcileOutcome::KeepPending,
    }
}
