//! HTTP handlers for subscription and checkout endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::application::handlers::subscription::{
    EvaluateSubscriptionQuery, RegisterTrialCommand, StartCheckoutCommand,
};
use crate::domain::foundation::DomainError;
use crate::domain::subscription::{PlanTier, SubscriptionStatus};

use super::error::ApiError;
use super::middleware::RequireTenant;
use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub status: SubscriptionStatus,
}

/// GET /api/subscription - current entitlement state for the tenant.
pub async fn get_subscription(
    State(state): State<AppState>,
    RequireTenant(owner_id): RequireTenant,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let status = state
        .evaluate_subscription_handler()
        .handle(EvaluateSubscriptionQuery { owner_id })
        .await?;

    Ok(Json(SubscriptionResponse { status }))
}

/// POST /api/subscription/trial - ensure a trial subscription exists.
///
/// Idempotent: an existing subscription (trial or paid) is returned as-is.
pub async fn register_trial(
    State(state): State<AppState>,
    RequireTenant(owner_id): RequireTenant,
) -> Result<impl IntoResponse, ApiError> {
    state
        .register_trial_handler()
        .handle(RegisterTrialCommand { owner_id })
        .await?;

    let status = state
        .evaluate_subscription_handler()
        .handle(EvaluateSubscriptionQuery { owner_id })
        .await?;

    Ok((StatusCode::CREATED, Json(SubscriptionResponse { status })))
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub checkout_url: String,
    pub external_reference: String,
}

/// POST /api/checkout/:plan - open a gateway checkout for a paid plan.
pub async fn start_checkout(
    State(state): State<AppState>,
    RequireTenant(owner_id): RequireTenant,
    Path(plan): Path<String>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let plan: PlanTier = plan
        .parse()
        .map_err(|_| ApiError(DomainError::validation("plan", "Unknown plan")))?;

    let started = state
        .start_checkout_handler()
        .handle(StartCheckoutCommand { owner_id, plan })
        .await?;

    Ok(Json(CheckoutResponse {
        checkout_url: started.checkout_url,
        external_reference: started.external_reference,
    }))
}

#[derive(Debug, Serialize)]
pub struct ExpiredPageResponse {
    pub title: String,
    pub message: String,
    pub support_email: Option<String>,
    pub plans: Vec<&'static str>,
}

/// GET /subscription/expired - landing page data for lapsed accounts.
///
/// Always reachable regardless of entitlement; the access gate allow-lists
/// this path.
pub async fn expired_page(State(state): State<AppState>) -> Json<ExpiredPageResponse> {
    Json(ExpiredPageResponse {
        title: state.site.title.clone(),
        message: "Your subscription has expired. Choose a plan to keep writing.".to_string(),
        support_email: state.site.support_email.clone(),
        plans: vec!["basic", "professional", "premium"],
    })
}
