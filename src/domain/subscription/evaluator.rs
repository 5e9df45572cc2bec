//! Subscription state evaluator.
//!
//! Turns a subscription record (or its absence) plus the current time into
//! the entitlement decision the access gate enforces. Evaluated fresh on
//! every request; entitlement is never cached across requests, so a payment
//! landing via webhook is honored on the very next request.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{PlanTier, Subscription};

/// Days-remaining threshold at which the near-expiry advisory fires.
pub const EXPIRY_WARNING_DAYS: u32 = 3;

/// How an entitled subscription is classified for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Trial,
    Paid,
}

/// Evaluated entitlement state for one account at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// The account may read and write.
    Entitled {
        classification: Classification,
        /// Whole days until the period ends, rounded up, never negative.
        days_remaining: u32,
        /// Advisory only: entitled but ending within [`EXPIRY_WARNING_DAYS`].
        expiring_soon: bool,
    },

    /// Period lapsed or subscription deactivated; writes are blocked.
    Expired,

    /// No subscription record exists for the account.
    ///
    /// Distinct from `Expired`: every account gets a subscription at
    /// registration, so absence is a provisioning bug. Callers must fail
    /// closed and log, never silently grant or deny.
    Missing,
}

impl SubscriptionStatus {
    /// Evaluate a subscription record against `now`.
    pub fn evaluate(subscription: Option<&Subscription>, now: Timestamp) -> Self {
        let Some(sub) = subscription else {
            return SubscriptionStatus::Missing;
        };

        if !sub.active || sub.period_expired(now) {
            return SubscriptionStatus::Expired;
        }

        let days_remaining = now.days_until(&sub.period_end);
        let classification = match sub.plan {
            PlanTier::Trial => Classification::Trial,
            _ => Classification::Paid,
        };

        SubscriptionStatus::Entitled {
            classification,
            days_remaining,
            expiring_soon: days_remaining <= EXPIRY_WARNING_DAYS,
        }
    }

    /// True when write access is granted.
    pub fn is_entitled(&self) -> bool {
        matches!(self, SubscriptionStatus::Entitled { .. })
    }

    /// Days remaining, 0 when not entitled.
    pub fn days_remaining(&self) -> u32 {
        match self {
            SubscriptionStatus::Entitled { days_remaining, .. } => *days_remaining,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::OwnerId;

    fn trial_sub(now: Timestamp) -> Subscription {
        Subscription::start_trial(OwnerId::new(), now)
    }

    #[test]
    fn active_unexpired_trial_is_entitled() {
        let now = Timestamp::now();
        let sub = trial_sub(now);

        let status = SubscriptionStatus::evaluate(Some(&sub), now);
        assert!(status.is_entitled());
        match status {
            SubscriptionStatus::Entitled { classification, .. } => {
                assert_eq!(classification, Classification::Trial);
            }
            other => panic!("expected entitled, got {:?}", other),
        }
    }

    #[test]
    fn three_days_left_sets_warning() {
        let now = Timestamp::now();
        let mut sub = trial_sub(now);
        sub.period_end = now.add_days(3);

        match SubscriptionStatus::evaluate(Some(&sub), now) {
            SubscriptionStatus::Entitled {
                days_remaining,
                expiring_soon,
                ..
            } => {
                assert_eq!(days_remaining, 3);
                assert!(expiring_soon);
            }
            other => panic!("expected entitled, got {:?}", other),
        }
    }

    #[test]
    fn five_days_left_has_no_warning() {
        let now = Timestamp::now();
        let mut sub = trial_sub(now);
        sub.period_end = now.add_days(5);

        match SubscriptionStatus::evaluate(Some(&sub), now) {
            SubscriptionStatus::Entitled { expiring_soon, .. } => assert!(!expiring_soon),
            other => panic!("expected entitled, got {:?}", other),
        }
    }

    #[test]
    fn lapsed_period_is_expired_with_zero_days() {
        let now = Timestamp::now();
        let mut sub = trial_sub(now);
        sub.period_end = now.add_days(-1);

        let status = SubscriptionStatus::evaluate(Some(&sub), now);
        assert_eq!(status, SubscriptionStatus::Expired);
        assert_eq!(status.days_remaining(), 0);
    }

    #[test]
    fn inactive_flag_expires_even_within_period() {
        let now = Timestamp::now();
        let mut sub = trial_sub(now);
        sub.active = false;

        assert_eq!(
            SubscriptionStatus::evaluate(Some(&sub), now),
            SubscriptionStatus::Expired
        );
    }

    #[test]
    fn paid_plan_classifies_as_paid() {
        let now = Timestamp::now();
        let mut sub = trial_sub(now);
        sub.confirm_payment(PlanTier::Premium, now);

        match SubscriptionStatus::evaluate(Some(&sub), now) {
            SubscriptionStatus::Entitled { classification, .. } => {
                assert_eq!(classification, Classification::Paid);
            }
            other => panic!("expected entitled, got {:?}", other),
        }
    }

    #[test]
    fn absence_is_missing_not_expired() {
        let status = SubscriptionStatus::evaluate(None, Timestamp::now());
        assert_eq!(status, SubscriptionStatus::Missing);
        assert_ne!(status, SubscriptionStatus::Expired);
        assert!(!status.is_entitled());
    }

    #[test]
    fn serializes_with_state_tag() {
        let now = Timestamp::now();
        let sub = trial_sub(now);
        let json =
            serde_json::to_string(&SubscriptionStatus::evaluate(Some(&sub), now)).unwrap();
        assert!(json.contains("\"state\":\"entitled\""));
        assert!(json.contains("\"classification\":\"trial\""));
    }
}
