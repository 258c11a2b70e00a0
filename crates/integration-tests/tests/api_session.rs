//! Integration tests for authentication and UI state.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};
use wardrobe_integration_tests::TestApp;

fn credentials() -> Value {
    json!({ "email": "asha@example.com", "password": "hunter2" })
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_signed_out_by_default() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().contains("not signed in"));
}

#[tokio::test]
async fn test_login_and_me() {
    let app = TestApp::new();
    let (status, body) = app.post("/api/auth/login", credentials()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], "user1");
    assert_eq!(body["user"]["name"], "Demo User");
    assert_eq!(body["user"]["email"], "asha@example.com");
    assert_eq!(body["token"], "mock-jwt-token");

    let (status, me) = app.get("/api/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "asha@example.com");
    assert!(me.get("token").is_none());
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/api/auth/login", json!({ "email": "asha@example.com" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, _) = app.get("/api/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_uses_submitted_name() {
    let app = TestApp::new();
    let mut body = credentials();
    body["name"] = json!("Asha Rao");

    let (status, body) = app.post("/api/auth/register", body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["name"], "Asha Rao");
}

#[tokio::test]
async fn test_register_requires_name() {
    let app = TestApp::new();
    let (status, body) = app.post("/api/auth/register", credentials()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid user data");
}

#[tokio::test]
async fn test_logout() {
    let app = TestApp::new();
    app.post("/api/auth/login", credentials()).await;

    let (status, _) = app.request(Method::POST, "/api/auth/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get("/api/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_closes_auth_modal() {
    let app = TestApp::new();
    app.post("/api/ui/auth-modal", json!({ "mode": "login" })).await;
    app.post("/api/auth/login", credentials()).await;

    let (_, ui) = app.get("/api/ui").await;
    assert_eq!(ui["authModal"], Value::Null);
}

// ============================================================================
// UI
// ============================================================================

#[tokio::test]
async fn test_ui_defaults() {
    let app = TestApp::new();
    let (status, ui) = app.get("/api/ui").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ui,
        json!({
            "darkMode": true,
            "showCart": false,
            "authModal": null,
            "notification": null,
            "mobileMenuOpen": false
        })
    );
}

#[tokio::test]
async fn test_toggles() {
    let app = TestApp::new();

    let (_, ui) = app.request(Method::POST, "/api/ui/dark-mode/toggle", None).await;
    assert_eq!(ui["darkMode"], false);

    let (_, ui) = app.request(Method::POST, "/api/ui/cart/toggle", None).await;
    assert_eq!(ui["showCart"], true);

    let (_, ui) = app.request(Method::POST, "/api/ui/mobile-menu/toggle", None).await;
    assert_eq!(ui["mobileMenuOpen"], true);

    let (_, ui) = app.request(Method::POST, "/api/ui/cart/toggle", None).await;
    assert_eq!(ui["showCart"], false);
}

#[tokio::test]
async fn test_auth_modal_switches_mode_while_open() {
    let app = TestApp::new();

    let (_, ui) = app.post("/api/ui/auth-modal", json!({ "mode": "register" })).await;
    assert_eq!(ui["authModal"], "register");

    // No body opens (or switches to) the login form
    let (_, ui) = app.request(Method::POST, "/api/ui/auth-modal", None).await;
    assert_eq!(ui["authModal"], "login");

    let (_, ui) = app.delete("/api/ui/auth-modal").await;
    assert_eq!(ui["authModal"], Value::Null);
}

#[tokio::test]
async fn test_dismiss_notification() {
    let app = TestApp::new();
    app.post("/api/cart/items", json!({ "productId": 1 })).await;

    let (_, ui) = app.get("/api/ui").await;
    assert!(ui["notification"].is_object());

    let (_, ui) = app.delete("/api/ui/notification").await;
    assert_eq!(ui["notification"], Value::Null);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    use axum::body::Body;
    use axum::http::Request;

    let app = TestApp::new();
    let router = wardrobe_storefront::routes::app(app.state.clone());
    let response = tower::ServiceExt::oneshot(
        router,
        Request::builder()
            .uri("/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(response.headers()["x-request-id"], "abc-123");
}
