//! Integration tests for Wardrobe.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wardrobe-integration-tests
//! ```
//!
//! Tests drive the full router in-process with `tower::ServiceExt::oneshot`
//! against a fixed catalog, so no network or running server is needed.
//!
//! # Test Categories
//!
//! - `api_products` - Listing filters, sorting and detail
//! - `api_cart` - Cart mutations, promo codes and checkout
//! - `api_session` - Sign-in, sign-out and UI state
//! - `persistence` - State carried across restarts

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use url::Url;
use wardrobe_core::{Category, Department, Money, Product, ProductId, ProductKind};
use wardrobe_storefront::catalog::StaticCatalog;
use wardrobe_storefront::config::{DEFAULT_CATALOG_URL, StorefrontConfig};
use wardrobe_storefront::routes;
use wardrobe_storefront::services::auth::MockAuthProvider;
use wardrobe_storefront::services::orders::MockOrderProvider;
use wardrobe_storefront::state::AppState;
use wardrobe_storefront::storage::{FileStorage, LocalStorage, MemoryStorage};

/// Build a catalog product with an explicit category.
#[must_use]
pub fn product(
    id: i64,
    name: &str,
    brand: &str,
    price: i64,
    department: Department,
    kind: ProductKind,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        brand: brand.to_string(),
        description: format!("{name} by {brand}"),
        price: Money::from_units(price),
        preview: format!("https://img.example.com/{id}.jpg"),
        photos: vec![],
        is_accessory: !kind.is_apparel(),
        category: Category::new(department, kind),
    }
}

/// A small mixed catalog.
///
/// | id | name                | price | category          |
/// |----|---------------------|-------|-------------------|
/// | 1  | Linen Shirt         | 1299  | men topwear       |
/// | 2  | Slim Chinos         | 899   | men bottomwear    |
/// | 3  | Floral Dress        | 1599  | women topwear     |
/// | 4  | Running Shoes       | 2499  | women footwear    |
/// | 5  | Canvas Tote         | 499   | women accessory   |
/// | 6  | Graphic Tee         | 399   | kids topwear      |
/// | 7  | Leather Belt        | 699   | men accessory     |
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    use Department::{Kids, Men, Women};
    use ProductKind::{Accessory, Bottomwear, Footwear, Topwear};

    vec![
        product(1, "Linen Shirt", "Coastline", 1299, Men, Topwear),
        product(2, "Slim Chinos", "Coastline", 899, Men, Bottomwear),
        product(3, "Floral Dress", "Bloom", 1599, Women, Topwear),
        product(4, "Running Shoes", "Stride", 2499, Women, Footwear),
        product(5, "Canvas Tote", "Bloom", 499, Women, Accessory),
        product(6, "Graphic Tee", "Little Co", 399, Kids, Topwear),
        product(7, "Leather Belt", "Stride", 699, Men, Accessory),
    ]
}

/// The storefront wired to the sample catalog and instant mock providers.
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    /// In-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new()))
    }

    /// File storage at `path`; reopening the same path simulates a restart.
    ///
    /// # Panics
    ///
    /// Panics if the storage file cannot be opened.
    #[must_use]
    pub fn with_file(path: &Path) -> Self {
        let storage = FileStorage::open(path).expect("Failed to open storage file");
        Self::with_storage(Arc::new(storage))
    }

    /// Use an explicit storage backend.
    ///
    /// # Panics
    ///
    /// Panics if the default catalog URL does not parse.
    #[must_use]
    pub fn with_storage(storage: Arc<dyn LocalStorage>) -> Self {
        let base_url = Url::parse(DEFAULT_CATALOG_URL).expect("Invalid default catalog URL");
        let state = AppState::from_parts(
            StorefrontConfig::with_catalog(base_url),
            storage,
            Arc::new(StaticCatalog::new(sample_catalog())),
            Arc::new(MockAuthProvider::new(Duration::ZERO)),
            Arc::new(MockOrderProvider),
        );
        let router = routes::app(state.clone());
        Self { state, router }
    }

    /// Send a request and decode the JSON response (`Null` for empty bodies).
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body is not JSON.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Ids of a product list response, in order.
#[must_use]
pub fn ids(products: &Value) -> Vec<i64> {
    products
        .as_array()
        .map(|list| list.iter().filter_map(|p| p.get("id")?.as_i64()).collect())
        .unwrap_or_default()
}

/// A checkout body that passes validation.
#[must_use]
pub fn valid_checkout() -> Value {
    serde_json::json!({
        "firstName": "Asha",
        "lastName": "Rao",
        "email": "asha@example.com",
        "phone": "9999999999",
        "address": "12 MG Road",
        "city": "Pune",
        "state": "MH",
        "zipCode": "411001",
        "country": "India",
        "paymentMethod": "cashOnDelivery"
    })
}
