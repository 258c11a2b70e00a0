//! Async operations over the store.
//!
//! Each operation is a single request/response with no retry. The store lock
//! is never held across an await: an operation dispatches its "started"
//! action, releases the lock, awaits the collaborator, then dispatches the
//! outcome.
//!
//! # Services
//!
//! - `auth` - Authentication provider (mocked)
//! - `orders` - Order submission provider (mocked)

pub mod auth;
pub mod orders;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::instrument;
use wardrobe_core::{
    CartError, CartItem, CheckoutForm, LoginRequest, OrderConfirmation, OrderRequest, Product,
    ProductId, PromoCode, PromoError, RegisterRequest, UserSession, ValidationErrors,
};

use crate::catalog::{CatalogError, CatalogSource};
use crate::store::{AuthAction, CartAction, Notification, ProductsAction, Store, UiAction};
use auth::{AuthError, AuthProvider};
use orders::{OrderError, OrderProvider};

/// Store shared between concurrent operations.
pub type SharedStore = Arc<RwLock<Store>>;

/// Errors from [`place_order`].
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// One or more form fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Order(#[from] OrderError),
}

// =============================================================================
// Catalog
// =============================================================================

/// Load the full catalog into the product slice.
///
/// # Errors
///
/// Returns the catalog error; its message is also stored in the slice.
#[instrument(skip_all)]
pub async fn fetch_products(
    store: &SharedStore,
    catalog: &dyn CatalogSource,
) -> Result<Vec<Product>, CatalogError> {
    dispatch(store, ProductsAction::FetchStarted).await;

    match catalog.products().await {
        Ok(products) => {
            tracing::info!(count = products.len(), "Catalog loaded");
            dispatch(store, ProductsAction::ProductsLoaded(products.clone())).await;
            Ok(products)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Catalog fetch failed");
            dispatch(store, ProductsAction::FetchFailed(e.to_string())).await;
            Err(e)
        }
    }
}

/// Load one product as the current product.
///
/// A product already in the loaded catalog is used without a request.
///
/// # Errors
///
/// Returns the catalog error; its message is also stored in the slice.
#[instrument(skip(store, catalog), fields(product_id = %id))]
pub async fn fetch_product_by_id(
    store: &SharedStore,
    catalog: &dyn CatalogSource,
    id: ProductId,
) -> Result<Product, CatalogError> {
    {
        let mut guard = store.write().await;
        if let Some(existing) = guard.products().find(id).cloned() {
            tracing::debug!("Product already loaded");
            let _ = guard.dispatch(ProductsAction::ProductLoaded(existing.clone()));
            return Ok(existing);
        }
        let _ = guard.dispatch(ProductsAction::FetchStarted);
    }

    match catalog.product(id).await {
        Ok(product) => {
            dispatch(store, ProductsAction::ProductLoaded(product.clone())).await;
            Ok(product)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Product fetch failed");
            dispatch(store, ProductsAction::FetchFailed(e.to_string())).await;
            Err(e)
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// Add `quantity` units of `product` and announce it.
///
/// # Errors
///
/// Returns the `CartError` if the cart refuses the units; the store has
/// already raised an error notification.
pub async fn add_to_cart(
    store: &SharedStore,
    product: &Product,
    quantity: u32,
) -> Result<(), CartError> {
    if quantity == 0 {
        return Ok(());
    }
    let item = CartItem::from(product);
    let message = if quantity > 1 {
        format!("{quantity} items added to your cart.")
    } else {
        format!("{} has been added to your cart.", product.name)
    };

    let mut guard = store.write().await;
    guard.dispatch(CartAction::AddManyToCart { item, quantity })?;
    let _ = guard.dispatch(UiAction::ShowNotification(Notification::success(
        "Added to Cart",
        message,
    )));
    Ok(())
}

/// Check a promo code against the current cart and announce the outcome.
///
/// # Errors
///
/// Returns `PromoError::Invalid` for unknown codes.
pub async fn apply_promo(store: &SharedStore, code: &str) -> Result<PromoCode, PromoError> {
    let mut guard = store.write().await;
    match code.parse::<PromoCode>() {
        Ok(promo) => {
            let discount = guard.summary(Some(promo)).discount;
            let _ = guard.dispatch(UiAction::ShowNotification(Notification::success(
                "Promo Code Applied",
                format!("You got a discount of {discount}"),
            )));
            Ok(promo)
        }
        Err(e) => {
            let _ = guard.dispatch(UiAction::ShowNotification(Notification::error(
                "Invalid Promo Code",
                "The promo code you entered is invalid or expired.",
            )));
            Err(e)
        }
    }
}

// =============================================================================
// Auth
// =============================================================================

/// Sign in through `provider`.
///
/// # Errors
///
/// Returns the provider's error; its message is also stored in the slice.
#[instrument(skip_all)]
pub async fn login(
    store: &SharedStore,
    provider: &dyn AuthProvider,
    request: LoginRequest,
) -> Result<UserSession, AuthError> {
    dispatch(store, AuthAction::AuthStarted).await;
    let result = provider.login(request).await;
    finish_auth(store, result).await
}

/// Register through `provider`.
///
/// # Errors
///
/// Returns the provider's error; its message is also stored in the slice.
#[instrument(skip_all)]
pub async fn register(
    store: &SharedStore,
    provider: &dyn AuthProvider,
    request: RegisterRequest,
) -> Result<UserSession, AuthError> {
    dispatch(store, AuthAction::AuthStarted).await;
    let result = provider.register(request).await;
    finish_auth(store, result).await
}

async fn finish_auth(
    store: &SharedStore,
    result: Result<UserSession, AuthError>,
) -> Result<UserSession, AuthError> {
    let mut guard = store.write().await;
    match result {
        Ok(user) => {
            let _ = guard.dispatch(AuthAction::AuthSucceeded(user.clone()));
            let _ = guard.dispatch(UiAction::CloseAuthModal);
            Ok(user)
        }
        Err(e) => {
            tracing::info!(error = %e, "Authentication rejected");
            let _ = guard.dispatch(AuthAction::AuthFailed(e.to_string()));
            Err(e)
        }
    }
}

/// Sign out.
pub async fn logout(store: &SharedStore) {
    dispatch(store, AuthAction::Logout).await;
}

// =============================================================================
// Checkout
// =============================================================================

/// Validate the form, submit the cart, and announce the order.
///
/// Validation happens before anything is submitted; a failing form leaves
/// the cart untouched. Once the order is accepted only the submitted units
/// leave the cart, so items added while it was in flight remain.
///
/// # Errors
///
/// Returns `CheckoutError::Validation` with every failing field,
/// `CheckoutError::EmptyCart` if there is nothing to order, or the provider's
/// error.
#[instrument(skip_all)]
pub async fn place_order(
    store: &SharedStore,
    provider: &dyn OrderProvider,
    form: &CheckoutForm,
    promo: Option<PromoCode>,
) -> Result<OrderConfirmation, CheckoutError> {
    let checkout = form.validate()?;

    let request = {
        let guard = store.read().await;
        if guard.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        OrderRequest {
            customer_name: checkout.customer_name,
            email: checkout.email,
            country: checkout.country,
            payment_method: checkout.payment_method,
            items: guard.cart().items().to_vec(),
            summary: guard.summary(promo),
        }
    };

    let ordered = request.items.clone();
    let confirmation = provider.submit(request).await?;

    let mut guard = store.write().await;
    let _ = guard.dispatch(CartAction::RemoveOrdered(ordered));
    let _ = guard.dispatch(UiAction::ShowNotification(Notification::success(
        "Order Placed",
        "Your order has been placed successfully!",
    )));
    tracing::info!(order_number = %confirmation.order_number, "Order placed");

    Ok(confirmation)
}

/// Dispatch an action that cannot fail.
async fn dispatch(store: &SharedStore, action: impl Into<crate::store::Action>) {
    if let Err(e) = store.write().await.dispatch(action) {
        tracing::debug!(error = %e, "Dispatch rejected");
    }
}
