//! Subscription access gate.
//!
//! Runs after auth, before handlers. Tenants whose subscription has lapsed
//! are redirected (303) to the expired page for every route outside the
//! allow-list; no handler runs. Entitlement is evaluated fresh on every
//! request, so a lapsed subscription takes effect on the very next one.

use axum::{
    extract::{Request, State},
    http::{header::HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::application::handlers::subscription::EvaluateSubscriptionQuery;

use super::auth::AuthenticatedTenant;
use crate::adapters::http::state::AppState;

/// Where unentitled requests are sent.
pub const EXPIRED_PATH: &str = "/subscription/expired";

/// Advisory header carrying days left in the current period.
pub static DAYS_REMAINING_HEADER: HeaderName =
    HeaderName::from_static("x-subscription-days-remaining");

/// Paths that must stay reachable with a lapsed (or absent) subscription.
const ALLOWED_PATHS: &[&str] = &[
    EXPIRED_PATH,
    "/logout",
    "/api/chat/diag",
    "/webhook/payments",
    "/health",
];

fn is_allowed(path: &str) -> bool {
    ALLOWED_PATHS.iter().any(|allowed| path.starts_with(allowed))
}

pub async fn access_gate_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if is_allowed(&path) {
        return next.run(request).await;
    }

    // Unauthenticated requests are the auth layer's problem, not the gate's.
    let Some(tenant) = request.extensions().get::<AuthenticatedTenant>().copied() else {
        return next.run(request).await;
    };

    let status = match state
        .evaluate_subscription_handler()
        .handle(EvaluateSubscriptionQuery { owner_id: tenant.0 })
        .await
    {
        Ok(status) => status,
        Err(e) => {
            tracing::error!(error = %e, "entitlement evaluation failed, failing closed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    // Reads and writes alike: outside the allow-list, a lapsed tenant only
    // ever sees the expired page.
    if !status.is_entitled() {
        tracing::info!(
            owner_id = %tenant.0,
            method = %request.method(),
            path = %path,
            "request blocked, subscription not entitled"
        );
        return Redirect::to(EXPIRED_PATH).into_response();
    }

    let days_remaining = status.days_remaining();
    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&days_remaining.to_string()) {
        response
            .headers_mut()
            .insert(DAYS_REMAINING_HEADER.clone(), value);
    }
    response
}
