//! Product derivation: the filter/sort pipeline behind the listing page.
//!
//! `apply` is pure. The same products and criteria always produce the same
//! output, and re-applying criteria to their own output changes nothing.

use std::cmp::Ordering;

use crate::catalog::Product;
use crate::criteria::{Criteria, SortKey};

/// Filter and sort `products` by `criteria`.
///
/// Stages run in order: category, inclusive price range, case-insensitive
/// search over name/description/brand, then sort. Sorting is total: ties on
/// the sort key fall back to id ascending.
#[must_use]
pub fn apply(products: &[Product], criteria: &Criteria) -> Vec<Product> {
    let needle = criteria.search_query.to_lowercase();

    let mut result: Vec<Product> = products
        .iter()
        .filter(|p| criteria.category.matches(p))
        .filter(|p| criteria.price_range.contains(p.price))
        .filter(|p| needle.is_empty() || p.matches_lowercase(&needle))
        .cloned()
        .collect();

    sort(&mut result, criteria.sort_by);
    result
}

/// Sort products in place by `key`, breaking ties by id.
pub fn sort(products: &mut [Product], key: SortKey) {
    products.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &Product, b: &Product, key: SortKey) -> Ordering {
    let primary = match key {
        SortKey::Default => Ordering::Equal,
        SortKey::PriceLowHigh => a.price.cmp(&b.price),
        SortKey::PriceHighLow => b.price.cmp(&a.price),
        SortKey::NameAscending => compare_names(&a.name, &b.name),
        SortKey::NameDescending => compare_names(&b.name, &a.name),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// Case-insensitive name order, falling back to the raw strings so names
/// differing only in case still order deterministically.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Up to `limit` products sharing `product`'s accessory flag, excluding the
/// product itself, in catalog order.
#[must_use]
pub fn related<'a>(products: &'a [Product], product: &Product, limit: usize) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.is_accessory == product.is_accessory && p.id != product.id)
        .take(limit)
        .collect()
}
