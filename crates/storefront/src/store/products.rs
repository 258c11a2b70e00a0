//! Product slice: the loaded catalog, the active criteria, and the derived
//! listing.

use serde::Serialize;
use wardrobe_core::{Criteria, CriteriaPatch, Product, ProductId, SortKey, derive};

/// Product slice actions.
#[derive(Debug, Clone)]
pub enum ProductsAction {
    /// A catalog request is in flight.
    FetchStarted,
    /// The full catalog arrived.
    ProductsLoaded(Vec<Product>),
    /// A single product arrived for the detail view.
    ProductLoaded(Product),
    /// A catalog request failed with this message.
    FetchFailed(String),
    /// Merge a partial criteria update over the current criteria.
    SetFilters(CriteriaPatch),
    /// Reset criteria to their defaults.
    ClearFilters,
    SortProducts(SortKey),
    SearchProducts(String),
}

/// Product slice state.
///
/// `filtered` is always `derive::apply(products, criteria)`; every reducer
/// that touches either input recomputes it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsState {
    pub products: Vec<Product>,
    pub filtered: Vec<Product>,
    pub current: Option<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub criteria: Criteria,
}

impl ProductsState {
    pub(crate) fn reduce(&mut self, action: ProductsAction) {
        match action {
            ProductsAction::FetchStarted => {
                self.loading = true;
                self.error = None;
            }
            ProductsAction::ProductsLoaded(products) => {
                self.loading = false;
                self.products = products;
                self.refilter();
            }
            ProductsAction::ProductLoaded(product) => {
                self.loading = false;
                self.current = Some(product);
            }
            ProductsAction::FetchFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            ProductsAction::SetFilters(patch) => {
                self.criteria.apply_patch(patch);
                self.refilter();
            }
            ProductsAction::ClearFilters => {
                self.criteria = Criteria::default();
                self.refilter();
            }
            ProductsAction::SortProducts(key) => {
                self.criteria.sort_by = key;
                self.refilter();
            }
            ProductsAction::SearchProducts(query) => {
                self.criteria.search_query = query;
                self.refilter();
            }
        }
    }

    fn refilter(&mut self) {
        self.filtered = derive::apply(&self.products, &self.criteria);
    }

    /// A product already present in the loaded catalog.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products to suggest on `product`'s detail page.
    #[must_use]
    pub fn related(&self, product: &Product) -> Vec<&Product> {
        derive::related(&self.products, product, RELATED_LIMIT)
    }
}

/// How many related products the detail page shows.
pub const RELATED_LIMIT: usize = 4;
