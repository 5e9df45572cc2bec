//! Billing module - payments and gateway reconciliation.
//!
//! Payments are created when checkout starts and mutated only by webhook
//! reconciliation. The external reference doubles as the idempotency key for
//! at-least-once webhook delivery.

mod payment;
mod reconciliation;

pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use reconciliation::{map_provider_status, ProviderPayment, ReconcileOutcome};
