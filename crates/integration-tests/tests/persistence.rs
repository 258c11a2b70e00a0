//! Integration tests for state persisted across restarts.
//!
//! Each test opens the storefront on a storage file, changes state, then
//! opens a second storefront on the same file.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::{Value, json};
use tempfile::TempDir;
use wardrobe_integration_tests::TestApp;
use wardrobe_storefront::storage::{FileStorage, LocalStorage, keys};

fn storage_file(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("storage.json")
}

fn stored(dir: &TempDir) -> Value {
    let raw = std::fs::read_to_string(storage_file(dir)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let app = TestApp::with_file(&storage_file(&dir));
        app.post("/api/cart/items", json!({ "productId": 2, "quantity": 2 }))
            .await;
        app.post("/api/cart/items", json!({ "productId": 5 })).await;
    }

    let app = TestApp::with_file(&storage_file(&dir));
    let (_, body) = app.get("/api/cart").await;
    assert_eq!(body["cart"]["totalQuantity"], 3);
    assert_eq!(body["cart"]["totalAmount"], "2297");
    assert_eq!(body["cart"]["items"][1]["name"], "Canvas Tote");
}

#[tokio::test]
async fn test_cleared_cart_removes_key() {
    let dir = TempDir::new().unwrap();
    let app = TestApp::with_file(&storage_file(&dir));
    app.post("/api/cart/items", json!({ "productId": 1 })).await;
    assert!(stored(&dir).get(keys::CART).is_some());

    app.delete("/api/cart").await;
    assert!(stored(&dir).get(keys::CART).is_none());

    let app = TestApp::with_file(&storage_file(&dir));
    let (_, body) = app.get("/api/cart").await;
    assert_eq!(body["cart"]["totalQuantity"], 0);
}

#[tokio::test]
async fn test_session_survives_until_logout() {
    let dir = TempDir::new().unwrap();
    {
        let app = TestApp::with_file(&storage_file(&dir));
        app.post(
            "/api/auth/login",
            json!({ "email": "asha@example.com", "password": "pw" }),
        )
        .await;
    }

    let app = TestApp::with_file(&storage_file(&dir));
    let (status, me) = app.get("/api/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "asha@example.com");

    app.request(Method::POST, "/api/auth/logout", None).await;
    assert!(stored(&dir).get(keys::USER).is_none());

    let app = TestApp::with_file(&storage_file(&dir));
    let (status, _) = app.get("/api/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_theme_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let app = TestApp::with_file(&storage_file(&dir));
        app.request(Method::POST, "/api/ui/dark-mode/toggle", None)
            .await;
    }
    assert_eq!(stored(&dir)[keys::DARK_MODE], "false");

    let app = TestApp::with_file(&storage_file(&dir));
    let (_, ui) = app.get("/api/ui").await;
    assert_eq!(ui["darkMode"], false);
}

#[tokio::test]
async fn test_ui_flags_are_not_persisted() {
    let dir = TempDir::new().unwrap();
    {
        let app = TestApp::with_file(&storage_file(&dir));
        app.request(Method::POST, "/api/ui/cart/toggle", None).await;
        app.post("/api/ui/auth-modal", json!({ "mode": "register" }))
            .await;
    }

    let app = TestApp::with_file(&storage_file(&dir));
    let (_, ui) = app.get("/api/ui").await;
    assert_eq!(ui["showCart"], false);
    assert_eq!(ui["authModal"], Value::Null);
}

#[tokio::test]
async fn test_corrupt_values_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::open(storage_file(&dir)).unwrap();
    storage.set(keys::CART, "{not json").unwrap();
    storage.set(keys::USER, "42").unwrap();
    storage.set(keys::DARK_MODE, "sometimes").unwrap();

    let app = TestApp::with_storage(Arc::new(storage));
    let (_, cart) = app.get("/api/cart").await;
    assert_eq!(cart["cart"]["totalQuantity"], 0);

    let (status, _) = app.get("/api/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, ui) = app.get("/api/ui").await;
    assert_eq!(ui["darkMode"], true);
}

#[tokio::test]
async fn test_legacy_cart_snapshot_is_recomputed() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::open(storage_file(&dir)).unwrap();
    // Stale aggregates and numeric prices, as older clients wrote them
    let snapshot = json!({
        "items": [
            { "id": 3, "name": "Floral Dress", "price": 1599, "quantity": 2, "totalPrice": 1 }
        ],
        "totalQuantity": 9,
        "totalAmount": 0
    });
    storage.set(keys::CART, &snapshot.to_string()).unwrap();

    let app = TestApp::with_storage(Arc::new(storage));
    let (_, body) = app.get("/api/cart").await;
    assert_eq!(body["cart"]["totalQuantity"], 2);
    assert_eq!(body["cart"]["totalAmount"], "3198");
    assert_eq!(body["cart"]["items"][0]["totalPrice"], "3198");
}
