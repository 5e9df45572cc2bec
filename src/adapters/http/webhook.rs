//! Payment provider webhook endpoint.
//!
//! All resolvable notifications are acknowledged with 200 so the provider
//! stops retrying; only transient failures (gateway fetch, database) surface
//! as errors, which the provider retries later.

use axum::extract::State;
use axum::Json;

use crate::application::handlers::billing::{ReconcileWebhookCommand, WebhookDisposition};

use super::error::ApiError;
use super::state::AppState;

/// POST /webhook/payments
pub async fn payment_webhook(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let disposition = state
        .reconcile_webhook_handler()
        .handle(ReconcileWebhookCommand { payload })
        .await?;

    let body = match disposition {
        WebhookDisposition::Processed => serde_json::json!({ "ok": true }),
        WebhookDisposition::Ignored => serde_json::json!({ "ok": true, "ignored": true }),
        WebhookDisposition::MissingExternalReference => {
            serde_json::json!({ "ok": true, "missing_external_reference": true })
        }
        WebhookDisposition::UnknownReference => {
            serde_json::json!({ "ok": true, "unknown_reference": true })
        }
    };

    Ok(Json(body))
}
