//! Subscription use cases: trial registration, entitlement evaluation, and
//! checkout initiation.

#[cfg(test)]
pub(crate) mod test_support;

mod evaluate;
mod register_trial;
mod start_checkout;

pub use evaluate::{EvaluateSubscriptionHandler, EvaluateSubscriptionQuery};
pub use register_trial::{RegisterTrialCommand, RegisterTrialHandler};
pub use start_checkout::{
    CheckoutStarted, PlanPricing, StartCheckoutCommand, StartCheckoutHandler,
};
