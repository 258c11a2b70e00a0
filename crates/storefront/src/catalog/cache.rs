//! Cache types for catalog responses.

use std::sync::Arc;

use wardrobe_core::{Product, ProductId};

/// Cache key for catalog responses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Listing,
    Product(ProductId),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Listing(Arc<Vec<Product>>),
    Product(Box<Product>),
}
