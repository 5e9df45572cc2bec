//! Router assembly.
//!
//! Middleware runs outermost-first: trace, timeout, CORS, then auth (token
//! to tenant), then the subscription access gate, then the handler.

use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::{get, post, put};
use axum::{middleware, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::middleware::{access_gate_middleware, auth_middleware};
use super::state::AppState;
use super::{appointments, cashflow, reports, subscription, webhook};

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let api = Router::new()
        .route(
            "/api/appointments",
            post(appointments::create_appointment),
        )
        .route(
            "/api/appointments/:id",
            put(appointments::update_appointment).delete(appointments::delete_appointment),
        )
        .route(
            "/api/appointments/:id/reschedule",
            post(appointments::reschedule_appointment),
        )
        .route(
            "/api/appointments/:id/pay",
            post(appointments::pay_appointment),
        )
        .route(
            "/api/appointments/:id/complete",
            post(appointments::complete_appointment),
        )
        .route("/api/subscription", get(subscription::get_subscription))
        .route(
            "/api/subscription/trial",
            post(subscription::register_trial),
        )
        .route("/api/checkout/:plan", post(subscription::start_checkout))
        .route("/api/cashflow", get(cashflow::get_cash_flow))
        .route("/api/cashflow/series", get(cashflow::get_monthly_series))
        .route(
            "/api/reports/dentist-production.csv",
            get(reports::dentist_production_report),
        );

    Router::new()
        .merge(api)
        .route("/subscription/expired", get(subscription::expired_page))
        .route("/webhook/payments", post(webhook::payment_webhook))
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_gate_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ))
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
