//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use wardrobe_core::{
    CategoryFilter, Criteria, CriteriaError, CriteriaPatch, Money, PriceRange, Product, ProductId,
    SortKey,
};

use crate::error::Result;
use crate::services;
use crate::state::AppState;
use crate::store::ProductsAction;

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Search text.
    pub q: Option<String>,
    pub sort: Option<String>,
    /// Refetch the catalog even if it is already loaded.
    #[serde(default)]
    pub refresh: bool,
}

impl ListingQuery {
    /// Criteria this query asks for. Absent parameters take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid price range or an unknown sort key.
    pub fn into_patch(self) -> std::result::Result<CriteriaPatch, CriteriaError> {
        let price_range = if self.min_price.is_some() || self.max_price.is_some() {
            let defaults = PriceRange::default();
            let min = self.min_price.map_or(defaults.min(), Money::new);
            let max = self.max_price.map_or(defaults.max(), Money::new);
            Some(PriceRange::new(min, max)?)
        } else {
            None
        };

        Ok(CriteriaPatch {
            category: self.category.as_deref().map(CategoryFilter::parse),
            price_range,
            search_query: self.q,
            sort_by: self.sort.as_deref().map(str::parse::<SortKey>).transpose()?,
        })
    }
}

/// Product listing response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub criteria: Criteria,
    pub count: usize,
    pub products: Vec<Product>,
}

/// Product detail response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailResponse {
    pub product: Product,
    pub related: Vec<Product>,
}

/// Load the catalog unless it is already in the store.
pub(crate) async fn ensure_catalog(state: &AppState, refresh: bool) -> Result<()> {
    let loaded = !state.store().read().await.products().products.is_empty();
    if refresh || !loaded {
        services::fetch_products(state.store(), state.catalog()).await?;
    }
    Ok(())
}

/// List products matching the query.
///
/// Each request fully specifies the criteria, like navigating to the listing
/// page with a fresh query string.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ListingResponse>> {
    let refresh = query.refresh;
    let patch = query.into_patch()?;
    ensure_catalog(&state, refresh).await?;

    let mut store = state.store().write().await;
    let _ = store.dispatch(ProductsAction::ClearFilters);
    if !patch.is_empty() {
        let _ = store.dispatch(ProductsAction::SetFilters(patch));
    }

    let products = store.products();
    Ok(Json(ListingResponse {
        criteria: products.criteria.clone(),
        count: products.filtered.len(),
        products: products.filtered.clone(),
    }))
}

/// Product detail with related products.
///
/// Related products come from the loaded catalog. If it cannot be loaded the
/// detail is still served, with no related products.
#[instrument(skip(state), fields(product_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<DetailResponse>> {
    if let Err(e) = ensure_catalog(&state, false).await {
        tracing::warn!(error = %e, "Catalog unavailable for related products");
    }
    let product = services::fetch_product_by_id(state.store(), state.catalog(), id).await?;

    let store = state.store().read().await;
    let related = store
        .products()
        .related(&product)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(DetailResponse { product, related }))
}
