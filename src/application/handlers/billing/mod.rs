//! Billing use cases - gateway webhook reconciliation.

mod reconcile_webhook;

pub use reconcile_webhook::{
    ReconcileWebhookCommand, ReconcileWebhookHandler, WebhookDisposition,
};
