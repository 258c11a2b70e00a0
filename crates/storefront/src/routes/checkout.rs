//! Checkout route handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;
use wardrobe_core::{CheckoutForm, OrderConfirmation};

use crate::error::{Result, add_breadcrumb};
use crate::routes::cart::parse_promo;
use crate::services;
use crate::state::AppState;

/// Checkout request: the form fields plus an optional promo code.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(flatten)]
    pub form: CheckoutForm,
    #[serde(default)]
    pub promo: Option<String>,
}

/// Place an order for the current cart.
#[instrument(skip_all)]
pub async fn place_order(
    State(state): State<AppState>,
    Json(body): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderConfirmation>)> {
    let promo = parse_promo(body.promo.as_deref())?;
    add_breadcrumb("checkout", "Checkout submitted", None);

    let confirmation =
        services::place_order(state.store(), state.orders(), &body.form, promo).await?;

    let order_number = confirmation.order_number.to_string();
    add_breadcrumb(
        "checkout",
        "Order placed",
        Some(&[("order_number", order_number.as_str())]),
    );

    Ok((StatusCode::CREATED, Json(confirmation)))
}
