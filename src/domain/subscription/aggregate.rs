//! Subscription aggregate entity.
//!
//! The Subscription represents an account's entitlement window. Each owner
//! has exactly one (unique constraint on owner_id at the database level).
//!
//! # Design Decisions
//!
//! - **One per owner**: provisioning creates it at registration, never later
//! - **`active` alone is not entitlement**: the evaluator also checks
//!   `now <= period_end`
//! - **Explicit period_end**: there is no fallback chain for the trial end;
//!   the field is required

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OwnerId, SubscriptionId, Timestamp};

use super::{PlanTier, RENEWAL_DAYS, TRIAL_DAYS};

/// Subscription aggregate - one entitlement window per owner account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique identifier for this subscription.
    pub id: SubscriptionId,

    /// Owner account this subscription belongs to.
    pub owner_id: OwnerId,

    /// Current plan tier.
    pub plan: PlanTier,

    /// Start of the current entitlement period.
    pub period_start: Timestamp,

    /// End of the current entitlement period.
    pub period_end: Timestamp,

    /// Administrative flag. Entitlement requires this AND an unexpired period.
    pub active: bool,

    /// When the subscription was created.
    pub created_at: Timestamp,

    /// When the subscription was last updated.
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Create the trial subscription granted at account registration.
    ///
    /// The trial runs for [`TRIAL_DAYS`] from `now`.
    pub fn start_trial(owner_id: OwnerId, now: Timestamp) -> Self {
        Self {
            id: SubscriptionId::new(),
            owner_id,
            plan: PlanTier::Trial,
            period_start: now,
            period_end: now.add_days(TRIAL_DAYS),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a confirmed payment: activate and extend the period by
    /// [`RENEWAL_DAYS`] from `now`.
    ///
    /// Called by webhook reconciliation exactly once per paid Payment; the
    /// caller is responsible for the at-most-once guarantee.
    pub fn confirm_payment(&mut self, plan: PlanTier, now: Timestamp) {
        self.plan = plan;
        self.active = true;
        self.period_start = now;
        self.period_end = now.add_days(RENEWAL_DAYS);
        self.updated_at = now;
    }

    /// Administratively deactivate the subscription.
    pub fn deactivate(&mut self, now: Timestamp) {
        self.active = false;
        self.updated_at = now;
    }

    /// True when the period has lapsed, regardless of the active flag.
    pub fn period_expired(&self, now: Timestamp) -> bool {
        now.is_after(&self.period_end)
    }
}
