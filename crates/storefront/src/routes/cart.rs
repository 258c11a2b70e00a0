//! Cart route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use wardrobe_core::{Cart, CartError, CartLine, CartSummary, Product, ProductId, PromoCode};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::services;
use crate::state::AppState;
use crate::store::CartAction;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Promo code request body.
#[derive(Debug, Deserialize)]
pub struct PromoRequest {
    pub code: String,
}

/// Summary query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub promo: Option<String>,
}

/// Cart contents with their totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart: Cart,
    pub summary: CartSummary,
}

impl CartResponse {
    fn new(cart: &Cart, promo: Option<PromoCode>) -> Self {
        Self {
            cart: cart.clone(),
            summary: CartSummary::compute(cart, promo),
        }
    }
}

/// Parse an optional promo parameter; blank counts as absent.
pub(crate) fn parse_promo(code: Option<&str>) -> Result<Option<PromoCode>> {
    match code.map(str::trim) {
        None | Some("") => Ok(None),
        Some(code) => Ok(Some(code.parse()?)),
    }
}

/// Look up a product for the cart, preferring the loaded catalog.
async fn resolve_product(state: &AppState, id: ProductId) -> Result<Product> {
    if let Some(product) = state.store().read().await.products().find(id).cloned() {
        return Ok(product);
    }
    Ok(state.catalog().product(id).await?)
}

/// Show the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartResponse> {
    let store = state.store().read().await;
    Json(CartResponse::new(store.cart(), None))
}

/// Cart totals, optionally with a promo code applied.
#[instrument(skip(state))]
pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<CartSummary>> {
    let promo = parse_promo(query.promo.as_deref())?;
    Ok(Json(state.store().read().await.summary(promo)))
}

/// Apply a promo code and announce the result.
#[instrument(skip(state, body))]
pub async fn apply_promo(
    State(state): State<AppState>,
    Json(body): Json<PromoRequest>,
) -> Result<Json<CartSummary>> {
    let promo = services::apply_promo(state.store(), &body.code).await?;
    Ok(Json(state.store().read().await.summary(Some(promo))))
}

/// Add units of a product.
#[instrument(skip(state), fields(product_id = %body.product_id))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<CartResponse>> {
    if body.quantity == 0 {
        return Err(AppError::BadRequest("quantity must be at least 1".to_string()));
    }

    let product = resolve_product(&state, body.product_id).await?;
    let id = product.id.to_string();
    let quantity = body.quantity.to_string();
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", id.as_str()), ("quantity", quantity.as_str())]),
    );

    services::add_to_cart(state.store(), &product, body.quantity).await?;

    let store = state.store().read().await;
    Ok(Json(CartResponse::new(store.cart(), None)))
}

/// Remove one unit of a product.
#[instrument(skip(state), fields(product_id = %id))]
pub async fn remove_one(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<CartResponse>> {
    let mut store = state.store().write().await;
    store.dispatch(CartAction::RemoveFromCart(id))?;
    Ok(Json(CartResponse::new(store.cart(), None)))
}

/// Remove a product's whole line.
#[instrument(skip(state), fields(product_id = %id))]
pub async fn remove_line(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<CartLine>> {
    let mut store = state.store().write().await;
    let line = store.cart().line(id).cloned();
    store.dispatch(CartAction::RemoveItemCompletely(id))?;
    line.map(Json)
        .ok_or_else(|| CartError::LineNotFound(id).into())
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartResponse> {
    let mut store = state.store().write().await;
    let _ = store.dispatch(CartAction::ClearCart);
    Json(CartResponse::new(store.cart(), None))
}
