//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding. All route handlers return `Result<T, AppError>`.
//! Error bodies are JSON: `{"error": "..."}`, plus `"fields"` for checkout
//! validation failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use wardrobe_core::{CartError, CriteriaError, PromoError};

use crate::catalog::CatalogError;
use crate::services::CheckoutError;
use crate::services::auth::AuthError;
use crate::services::orders::OrderError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog request failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Authentication failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Cart operation rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Filter criteria rejected.
    #[error("Invalid criteria: {0}")]
    Criteria(#[from] CriteriaError),

    /// Unknown promo code.
    #[error("Promo error: {0}")]
    Promo(#[from] PromoError),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether this is our fault (or an upstream's) rather than the caller's.
    fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Catalog(
                CatalogError::Http(_)
                    | CatalogError::Status { .. }
                    | CatalogError::Parse(_)
                    | CatalogError::InvalidProduct(_)
            )
                | Self::Auth(AuthError::Unavailable(_))
                | Self::Checkout(CheckoutError::Order(_))
        )
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Catalog(_) | Self::Auth(AuthError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
            Self::Auth(AuthError::InvalidCredentials) | Self::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Auth(AuthError::InvalidUserData) | Self::Criteria(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Checkout(err) => match err {
                CheckoutError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CheckoutError::EmptyCart => StatusCode::CONFLICT,
                CheckoutError::Order(OrderError::Rejected(_)) => StatusCode::BAD_GATEWAY,
                CheckoutError::Order(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Cart(CartError::LineNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Cart(CartError::NegativePrice(_) | CartError::AmountOverflow(_))
            | Self::Promo(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Client-facing message. Internal details are never exposed.
    fn public_message(&self) -> String {
        match self {
            Self::Catalog(CatalogError::NotFound(id)) => format!("Product {id} not found"),
            Self::Catalog(_) => "Catalog service error".to_string(),
            Self::Auth(AuthError::Unavailable(_)) => "Authentication service error".to_string(),
            Self::Auth(err) => err.to_string(),
            Self::Checkout(CheckoutError::Validation(_)) => {
                "Please correct the highlighted fields".to_string()
            }
            Self::Checkout(CheckoutError::EmptyCart) => "Your cart is empty".to_string(),
            Self::Checkout(CheckoutError::Order(_)) => "Order could not be placed".to_string(),
            Self::Cart(CartError::LineNotFound(id)) => format!("Product {id} is not in the cart"),
            Self::Cart(CartError::NegativePrice(id) | CartError::AmountOverflow(id)) => {
                format!("Product {id} could not be added to the cart")
            }
            Self::Promo(_) => "The promo code you entered is invalid or expired.".to_string(),
            Self::Criteria(err) => err.to_string(),
            Self::Unauthorized(_) | Self::BadRequest(_) => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();
        let mut body = json!({ "error": self.public_message() });
        if let Self::Checkout(CheckoutError::Validation(errors)) = &self {
            body["fields"] = json!(errors.errors);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context after sign-in.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context on sign-out.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a shopper action.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "12")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;
    use wardrobe_core::{CheckoutForm, ProductId};

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    async fn body(err: AppError) -> serde_json::Value {
        let bytes = to_bytes(err.into_response().into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::Unauthorized("not signed in".to_string());
        assert_eq!(err.to_string(), "Unauthorized: not signed in");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::Catalog(CatalogError::NotFound(ProductId::new(9)))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::LineNotFound(ProductId::new(1)))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Catalog(CatalogError::Status { status: 500 })),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::AmountOverflow(ProductId::new(1)))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_upstream_details_are_hidden() {
        let json = body(AppError::Catalog(CatalogError::Status { status: 503 })).await;
        assert_eq!(json["error"], "Catalog service error");

        let json = body(AppError::Auth(AuthError::Unavailable("pool exhausted".into()))).await;
        assert_eq!(json["error"], "Authentication service error");
    }

    #[tokio::test]
    async fn test_validation_body_lists_fields() {
        let errors = CheckoutForm::default().validate().unwrap_err();
        let json = body(AppError::Checkout(CheckoutError::Validation(errors))).await;
        assert_eq!(json["fields"][0]["field"], "firstName");
        assert_eq!(json["fields"][0]["message"], "First name is required");
    }
}
