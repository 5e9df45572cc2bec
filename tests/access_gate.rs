//! End-to-end tests for the subscription access gate.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use clinicore::domain::foundation::{OwnerId, Timestamp};
use clinicore::domain::subscription::Subscription;

use common::test_app;

fn authed(token: &str, method: &str, uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn expired_subscription_blocks_writes_with_redirect() {
    let app = test_app();
    let owner = OwnerId::new();
    app.sessions.grant("tok", owner);

    let mut subscription = Subscription::start_trial(owner, Timestamp::now());
    subscription.period_end = Timestamp::now().add_days(-1);
    app.subscriptions.0.lock().unwrap().push(subscription);

    let response = app
        .router
        .oneshot(authed("tok", "POST", "/api/appointments", Body::from("{}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/subscription/expired"
    );
    // The handler never ran.
    assert!(app.appointments.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn expired_subscription_blocks_reads_outside_the_allow_list() {
    let app = test_app();
    let owner = OwnerId::new();
    app.sessions.grant("tok", owner);

    let mut subscription = Subscription::start_trial(owner, Timestamp::now());
    subscription.period_end = Timestamp::now().add_days(-1);
    app.subscriptions.0.lock().unwrap().push(subscription);

    // Dashboards and reports are not an escape hatch: a lapsed tenant
    // reading cash flow is sent to the expired page like any write.
    let response = app
        .router
        .oneshot(authed("tok", "GET", "/api/cashflow", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/subscription/expired"
    );
}

#[tokio::test]
async fn entitled_requests_carry_days_remaining_header() {
    let app = test_app();
    let owner = OwnerId::new();
    app.sessions.grant("tok", owner);
    app.subscriptions
        .0
        .lock()
        .unwrap()
        .push(Subscription::start_trial(owner, Timestamp::now()));

    let response = app
        .router
        .oneshot(authed("tok", "GET", "/api/subscription", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-subscription-days-remaining")
            .unwrap(),
        "7"
    );

    let body = json_body(response).await;
    assert_eq!(body["state"], "entitled");
    assert_eq!(body["classification"], "trial");
}

#[tokio::test]
async fn expired_page_stays_reachable_when_lapsed() {
    let app = test_app();
    let owner = OwnerId::new();
    app.sessions.grant("tok", owner);

    let mut subscription = Subscription::start_trial(owner, Timestamp::now());
    subscription.period_end = Timestamp::now().add_days(-30);
    app.subscriptions.0.lock().unwrap().push(subscription);

    let response = app
        .router
        .oneshot(authed("tok", "GET", "/subscription/expired", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_token_yields_401_on_protected_routes() {
    let app = test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/subscription")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_token_is_rejected_by_auth() {
    let app = test_app();

    let response = app
        .router
        .oneshot(authed("nope", "GET", "/api/subscription", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_needs_no_auth() {
    let app = test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_subscription_row_blocks_writes() {
    let app = test_app();
    let owner = OwnerId::new();
    app.sessions.grant("tok", owner);

    let response = app
        .router
        .oneshot(authed("tok", "POST", "/api/appointments", Body::from("{}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
