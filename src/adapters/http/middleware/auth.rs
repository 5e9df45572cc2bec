//! Authentication middleware and extractors.
//!
//! The middleware validates Bearer tokens through the `SessionValidator`
//! port and injects [`AuthenticatedTenant`] into request extensions.
//! Handlers opt in with the [`RequireTenant`] extractor.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::OwnerId;
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// The tenant a validated session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedTenant(pub OwnerId);

/// Validates Bearer tokens and injects the tenant into extensions.
///
/// A missing token passes through without injecting, so public routes
/// (health, webhook) share the stack; an invalid token is rejected here
/// with 401.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match validator.validate(token).await {
            Ok(session) => {
                request
                    .extensions_mut()
                    .insert(AuthenticatedTenant(session.owner_id));
                next.run(request).await
            }
            Err(e) => {
                tracing::debug!(error = %e, "token validation failed");
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({
                        "error": "Invalid session",
                        "code": "UNAUTHORIZED",
                    })),
                )
                    .into_response()
            }
        },
        None => next.run(request).await,
    }
}

/// Extractor that requires an authenticated tenant.
#[derive(Debug, Clone, Copy)]
pub struct RequireTenant(pub OwnerId);

#[async_trait::async_trait]
impl<S> axum::extract::FromRequestParts<S> for RequireTenant
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedTenant>()
            .map(|tenant| RequireTenant(tenant.0))
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({
                        "error": "Authentication required",
                        "code": "UNAUTHORIZED",
                    })),
                )
                    .into_response()
            })
    }
}
