//! HTTP catalog client.
//!
//! Uses `reqwest` 0.13 for HTTP. Caches the listing and single products
//! using `moka` (TTL from configuration).

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::header::{CACHE_CONTROL, EXPIRES, HeaderMap, HeaderValue, PRAGMA};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use wardrobe_core::{Product, ProductId, ProductRecord};

use super::cache::{CacheKey, CacheValue};
use super::{CatalogError, CatalogSource};
use crate::config::CatalogConfig;

// =============================================================================
// HttpCatalog
// =============================================================================

/// Client for the remote REST catalog.
#[derive(Clone)]
pub struct HttpCatalog {
    inner: Arc<HttpCatalogInner>,
}

struct HttpCatalogInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl HttpCatalog {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(HttpCatalogInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    fn listing_url(&self) -> String {
        format!("{}/product", self.inner.base_url)
    }

    fn product_url(&self, id: ProductId) -> String {
        format!("{}/product/{id}", self.inner.base_url)
    }

    /// GET `url` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        not_found: Option<ProductId>,
    ) -> Result<T, CatalogError> {
        let response = self
            .inner
            .client
            .get(url)
            .headers(no_cache_headers())
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND
            && let Some(id) = not_found
        {
            return Err(CatalogError::NotFound(id));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }
}

/// Headers asking every cache between us and the catalog to revalidate.
fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    headers
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    #[instrument(skip(self))]
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(CacheValue::Listing(products)) =
            self.inner.cache.get(&CacheKey::Listing).await
        {
            debug!("Cache hit for product listing");
            return Ok(products.as_ref().clone());
        }

        let records: Vec<ProductRecord> = self.get_json(&self.listing_url(), None).await?;
        let products: Vec<Product> = records
            .into_iter()
            .filter_map(|record| {
                Product::try_from(record)
                    .inspect_err(|e| warn!(error = %e, "Skipping catalog record"))
                    .ok()
            })
            .collect();
        debug!(count = products.len(), "Fetched product listing");

        self.inner
            .cache
            .insert(CacheKey::Listing, CacheValue::Listing(Arc::new(products.clone())))
            .await;

        Ok(products)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        if let Some(CacheValue::Listing(products)) = self.inner.cache.get(&CacheKey::Listing).await
            && let Some(product) = products.iter().find(|p| p.id == id)
        {
            debug!("Product served from cached listing");
            return Ok(product.clone());
        }

        let record: ProductRecord = self.get_json(&self.product_url(id), Some(id)).await?;
        let product = Product::try_from(record)?;

        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use axum::extract::{Path, State};
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use url::Url;

    use super::*;

    #[derive(Clone, Default)]
    struct Hits {
        listing: Arc<AtomicUsize>,
        single: Arc<AtomicUsize>,
    }

    fn assert_no_cache(headers: &AxumHeaders) {
        assert_eq!(
            headers.get("cache-control").unwrap(),
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(headers.get("pragma").unwrap(), "no-cache");
        assert_eq!(headers.get("expires").unwrap(), "0");
    }

    async fn listing(State(hits): State<Hits>, headers: AxumHeaders) -> Json<Value> {
        assert_no_cache(&headers);
        hits.listing.fetch_add(1, Ordering::SeqCst);
        Json(json!([
            {"id": "1", "name": "Tee", "brand": "A", "description": "", "price": 200,
             "preview": "", "photos": [], "isAccessory": false},
            {"id": "2", "name": "Watch", "brand": "B", "description": "", "price": "1500",
             "preview": "", "photos": [], "isAccessory": true},
            {"id": "3", "name": "Refund", "price": -10}
        ]))
    }

    async fn single(
        State(hits): State<Hits>,
        Path(id): Path<String>,
        headers: AxumHeaders,
    ) -> Result<Json<Value>, StatusCode> {
        assert_no_cache(&headers);
        hits.single.fetch_add(1, Ordering::SeqCst);
        match id.as_str() {
            "7" => Ok(Json(json!({"id": "7", "name": "Belt", "price": 450, "isAccessory": true}))),
            "8" => Ok(Json(json!({"id": "8", "name": "Refund", "price": -10}))),
            _ => Err(StatusCode::NOT_FOUND),
        }
    }

    async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    async fn client(hits: &Hits) -> HttpCatalog {
        let router = Router::new()
            .route("/product", get(listing))
            .route("/product/{id}", get(single))
            .with_state(hits.clone());
        let base_url = serve(router).await;
        HttpCatalog::new(&CatalogConfig {
            base_url,
            cache_ttl: Duration::from_secs(60),
        })
    }

    #[tokio::test]
    async fn test_listing_is_fetched_once_then_cached() {
        let hits = Hits::default();
        let catalog = client(&hits).await;

        let first = catalog.products().await.unwrap();
        let second = catalog.products().await.unwrap();
        // The negatively priced record is skipped
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert_eq!(hits.listing.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_product_served_from_cached_listing() {
        let hits = Hits::default();
        let catalog = client(&hits).await;

        catalog.products().await.unwrap();
        let watch = catalog.product(ProductId::new(2)).await.unwrap();
        assert_eq!(watch.name, "Watch");
        assert_eq!(hits.single.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_single_product_fetch_and_not_found() {
        let hits = Hits::default();
        let catalog = client(&hits).await;

        let belt = catalog.product(ProductId::new(7)).await.unwrap();
        assert!(belt.is_accessory);
        catalog.product(ProductId::new(7)).await.unwrap();
        assert_eq!(hits.single.load(Ordering::SeqCst), 1);

        let missing = catalog.product(ProductId::new(99)).await;
        assert!(matches!(missing, Err(CatalogError::NotFound(id)) if id == ProductId::new(99)));

        let invalid = catalog.product(ProductId::new(8)).await;
        assert!(matches!(invalid, Err(CatalogError::InvalidProduct(_))));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let router =
            Router::new().route("/product", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let catalog = HttpCatalog::new(&CatalogConfig {
            base_url: serve(router).await,
            cache_ttl: Duration::from_secs(60),
        });

        let err = catalog.products().await.unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 503 }));
    }
}
