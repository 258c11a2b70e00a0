//! Integration tests for the cart, promo codes and checkout.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;
use wardrobe_integration_tests::{TestApp, valid_checkout};

async fn add(app: &TestApp, id: i64, quantity: u32) -> serde_json::Value {
    let (status, body) = app
        .post("/api/cart/items", json!({ "productId": id, "quantity": quantity }))
        .await;
    assert_eq!(status, StatusCode::OK, "add failed: {body}");
    body
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_empty_cart() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["items"], json!([]));
    assert_eq!(body["cart"]["totalQuantity"], 0);
    assert_eq!(body["summary"]["shipping"], "0");
    assert_eq!(body["summary"]["total"], "0");
}

#[tokio::test]
async fn test_add_merges_lines() {
    let app = TestApp::new();
    add(&app, 2, 2).await;
    add(&app, 5, 1).await;
    let body = add(&app, 2, 1).await;

    let cart = &body["cart"];
    assert_eq!(cart["items"].as_array().unwrap().len(), 2);
    assert_eq!(cart["items"][0]["id"], 2);
    assert_eq!(cart["items"][0]["quantity"], 3);
    assert_eq!(cart["items"][0]["totalPrice"], "2697");
    assert_eq!(cart["totalQuantity"], 4);
    assert_eq!(cart["totalAmount"], "3196");
}

#[tokio::test]
async fn test_add_announces_item() {
    let app = TestApp::new();
    add(&app, 1, 1).await;
    let (_, ui) = app.get("/api/ui").await;
    assert_eq!(ui["notification"]["title"], "Added to Cart");
    assert_eq!(
        ui["notification"]["message"],
        "Linen Shirt has been added to your cart."
    );

    add(&app, 1, 3).await;
    let (_, ui) = app.get("/api/ui").await;
    assert_eq!(ui["notification"]["message"], "3 items added to your cart.");
}

#[tokio::test]
async fn test_add_rejects_bad_requests() {
    let app = TestApp::new();

    let (status, _) = app
        .post("/api/cart/items", json!({ "productId": 1, "quantity": 0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.post("/api/cart/items", json!({ "productId": 99 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get("/api/cart").await;
    assert_eq!(body["cart"]["totalQuantity"], 0);
}

#[tokio::test]
async fn test_remove_one_then_line_disappears() {
    let app = TestApp::new();
    add(&app, 2, 2).await;

    let (status, body) = app.delete("/api/cart/items/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["items"][0]["quantity"], 1);
    assert_eq!(body["cart"]["totalAmount"], "899");

    let (_, body) = app.delete("/api/cart/items/2").await;
    assert_eq!(body["cart"]["items"], json!([]));
    assert_eq!(body["cart"]["totalAmount"], "0");
}

#[tokio::test]
async fn test_remove_missing_item_leaves_cart() {
    let app = TestApp::new();
    add(&app, 2, 1).await;

    let (status, body) = app.delete("/api/cart/items/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product 99 is not in the cart");

    let (_, body) = app.get("/api/cart").await;
    assert_eq!(body["cart"]["totalQuantity"], 1);

    let (_, ui) = app.get("/api/ui").await;
    assert_eq!(ui["notification"]["status"], "error");
    assert_eq!(ui["notification"]["title"], "Item Not In Cart");
}

#[tokio::test]
async fn test_remove_line_returns_removed_line() {
    let app = TestApp::new();
    add(&app, 2, 1).await;
    add(&app, 5, 3).await;

    let (status, line) = app.delete("/api/cart/lines/5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(line["id"], 5);
    assert_eq!(line["quantity"], 3);

    let (_, body) = app.get("/api/cart").await;
    assert_eq!(body["cart"]["totalQuantity"], 1);
    assert_eq!(body["cart"]["totalAmount"], "899");

    let (status, _) = app.delete("/api/cart/lines/5").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_cart() {
    let app = TestApp::new();
    add(&app, 1, 2).await;
    let (status, body) = app.delete("/api/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["totalQuantity"], 0);
}

// ============================================================================
// Summary and promo codes
// ============================================================================

#[tokio::test]
async fn test_summary_shipping_threshold() {
    let app = TestApp::new();
    add(&app, 2, 1).await;

    let (_, summary) = app.get("/api/cart/summary").await;
    assert_eq!(summary["subtotal"], "899");
    assert_eq!(summary["shipping"], "100");
    assert_eq!(summary["total"], "999");

    add(&app, 6, 1).await;
    let (_, summary) = app.get("/api/cart/summary").await;
    assert_eq!(summary["subtotal"], "1298");
    assert_eq!(summary["shipping"], "0");
    assert_eq!(summary["total"], "1298");
}

#[tokio::test]
async fn test_summary_with_promo() {
    let app = TestApp::new();
    add(&app, 2, 1).await;

    let (status, summary) = app.get("/api/cart/summary?promo=discount20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["promo"], "DISCOUNT20");
    assert_eq!(summary["discount"], "180");
    assert_eq!(summary["total"], "819");

    let (status, body) = app.get("/api/cart/summary?promo=HALFOFF").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "The promo code you entered is invalid or expired.");
}

#[tokio::test]
async fn test_apply_promo_notifies() {
    let app = TestApp::new();
    add(&app, 2, 1).await;

    let (status, summary) = app
        .post("/api/cart/promo", json!({ "code": "DISCOUNT20" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total"], "819");

    let (_, ui) = app.get("/api/ui").await;
    assert_eq!(ui["notification"]["title"], "Promo Code Applied");
    assert_eq!(ui["notification"]["message"], "You got a discount of Rs. 180");

    let (status, _) = app.post("/api/cart/promo", json!({ "code": "FREE" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (_, ui) = app.get("/api/ui").await;
    assert_eq!(ui["notification"]["title"], "Invalid Promo Code");
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_checkout_places_order_and_clears_cart() {
    let app = TestApp::new();
    add(&app, 1, 1).await;

    let (status, order) = app.post("/api/checkout", valid_checkout()).await;
    assert_eq!(status, StatusCode::CREATED, "checkout failed: {order}");
    assert!(order["orderNumber"].as_str().unwrap().starts_with("ORD-"));
    assert_eq!(order["orderNumber"].as_str().unwrap().len(), 10);
    assert_eq!(order["customerName"], "Asha Rao");
    assert_eq!(order["items"][0]["id"], 1);
    assert_eq!(order["summary"]["total"], "1299");

    let (_, body) = app.get("/api/cart").await;
    assert_eq!(body["cart"]["totalQuantity"], 0);

    let (_, ui) = app.get("/api/ui").await;
    assert_eq!(ui["notification"]["title"], "Order Placed");
    assert_eq!(
        ui["notification"]["message"],
        "Your order has been placed successfully!"
    );
}

#[tokio::test]
async fn test_checkout_applies_promo() {
    let app = TestApp::new();
    add(&app, 2, 1).await;

    let mut body = valid_checkout();
    body["promo"] = json!("DISCOUNT20");
    let (status, order) = app.post("/api/checkout", body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["summary"]["discount"], "180");
    assert_eq!(order["summary"]["total"], "819");
}

#[tokio::test]
async fn test_checkout_reports_every_invalid_field() {
    let app = TestApp::new();
    add(&app, 1, 1).await;

    let (status, body) = app.post("/api/checkout", json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = body["fields"].as_array().unwrap();
    // Credit card is the default payment method, so card fields are required too
    assert_eq!(fields.len(), 12);
    assert_eq!(fields[0]["field"], "firstName");
    assert_eq!(fields[11]["field"], "cvv");

    // Nothing was submitted
    let (_, cart) = app.get("/api/cart").await;
    assert_eq!(cart["cart"]["totalQuantity"], 1);
}

#[tokio::test]
async fn test_checkout_rejects_invalid_email() {
    let app = TestApp::new();
    add(&app, 1, 1).await;

    let mut body = valid_checkout();
    body["email"] = json!("not-an-email");
    let (status, body) = app.post("/api/checkout", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["fields"], json!([{ "field": "email", "message": "Email is invalid" }]));
}

#[tokio::test]
async fn test_checkout_with_empty_cart() {
    let app = TestApp::new();
    let (status, body) = app.post("/api/checkout", valid_checkout()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Your cart is empty");
}
