//! Subscription module - trial/paid entitlement lifecycle.
//!
//! Each owner account has exactly one Subscription. Registration grants a
//! 7-day trial; a confirmed payment extends the period by 30 days. The
//! evaluator turns the record plus the current time into an entitlement
//! decision consumed by the access gate on every request.

mod aggregate;
mod evaluator;
mod plan;

pub use aggregate::Subscription;
pub use evaluator::{Classification, SubscriptionStatus, EXPIRY_WARNING_DAYS};
pub use plan::PlanTier;

/// Days of entitlement granted at registration, before any payment.
pub const TRIAL_DAYS: i64 = 7;

/// Days added to the period on each confirmed payment.
pub const RENEWAL_DAYS: i64 = 30;
