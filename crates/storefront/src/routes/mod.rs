//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                     - Liveness check
//! GET    /health/ready               - Readiness check (catalog reachable)
//!
//! # Products
//! GET    /api/products               - Listing (?category&min_price&max_price&q&sort)
//! GET    /api/products/{id}          - Detail with related products
//!
//! # Cart
//! GET    /api/cart                   - Cart with totals
//! DELETE /api/cart                   - Empty the cart
//! GET    /api/cart/summary           - Totals (?promo)
//! POST   /api/cart/promo             - Apply a promo code
//! POST   /api/cart/items             - Add units of a product
//! DELETE /api/cart/items/{id}        - Remove one unit
//! DELETE /api/cart/lines/{id}        - Remove the whole line
//!
//! # Checkout
//! POST   /api/checkout               - Place an order
//!
//! # Auth
//! POST   /api/auth/login             - Sign in
//! POST   /api/auth/register          - Register
//! POST   /api/auth/logout            - Sign out
//! GET    /api/auth/me                - Signed-in user
//!
//! # UI
//! GET    /api/ui                     - UI state
//! POST   /api/ui/dark-mode/toggle    - Toggle theme
//! POST   /api/ui/auth-modal          - Open (or switch) the auth modal
//! DELETE /api/ui/auth-modal          - Close the auth modal
//! POST   /api/ui/cart/toggle         - Toggle the cart drawer
//! POST   /api/ui/mobile-menu/toggle  - Toggle the mobile menu
//! DELETE /api/ui/notification        - Dismiss the notification
//! ```

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod ui;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/summary", get(cart::summary))
        .route("/promo", post(cart::apply_promo))
        .route("/items", post(cart::add))
        .route("/items/{id}", delete(cart::remove_one))
        .route("/lines/{id}", delete(cart::remove_line))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the UI routes router.
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(ui::show))
        .route("/dark-mode/toggle", post(ui::toggle_dark_mode))
        .route(
            "/auth-modal",
            post(ui::open_auth_modal).delete(ui::close_auth_modal),
        )
        .route("/cart/toggle", post(ui::toggle_cart))
        .route("/mobile-menu/toggle", post(ui::toggle_mobile_menu))
        .route("/notification", delete(ui::clear_notification))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .route("/api/checkout", post(checkout::place_order))
        .nest("/api/auth", auth_routes())
        .nest("/api/ui", ui_routes())
}

/// Build the complete application with its middleware stack.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Loads the catalog if it is not loaded yet. Returns 503 Service
/// Unavailable if the catalog cannot be reached.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match products::ensure_catalog(&state, false).await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
