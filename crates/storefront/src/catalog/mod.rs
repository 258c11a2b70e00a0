//! Remote product catalog.
//!
//! # Architecture
//!
//! - The catalog is a plain REST endpoint: `GET {base}/product` lists every
//!   product and `GET {base}/product/{id}` returns one
//! - Requests carry cache-busting headers so intermediaries never serve a
//!   stale listing
//! - Responses are cached in memory via `moka` for the configured TTL
//!
//! The store depends on [`CatalogSource`], not on [`HttpCatalog`], so tests
//! and the CLI can swap in a fixed product list.

mod cache;
mod http;

pub use http::HttpCatalog;

use async_trait::async_trait;
use thiserror::Error;
use wardrobe_core::{Product, ProductError, ProductId};

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("Catalog returned HTTP {status}")]
    Status { status: u16 },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No product with this id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The record could not be ingested.
    #[error("Invalid product: {0}")]
    InvalidProduct(#[from] ProductError),
}

/// Read access to the product catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every product in catalog order.
    async fn products(&self) -> Result<Vec<Product>, CatalogError>;

    /// A single product.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;
}

/// Catalog backed by a fixed in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }
}
