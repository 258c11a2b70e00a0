//! Filter criteria driving product derivation.
//!
//! Criteria are transient: built from the listing query string and updated by
//! partial patches as the shopper changes filters.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Department, Product, ProductKind};
use crate::types::Money;

/// Errors building criteria from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("price range minimum {min} exceeds maximum {max}")]
    InvertedRange { min: Money, max: Money },

    #[error("price range bounds cannot be negative")]
    NegativeBound,

    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
}

/// Price above which a product counts as trending.
const TRENDING_THRESHOLD: i64 = 1000;

/// Groups of product kinds addressable by a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindGroup {
    /// Topwear and bottomwear.
    Apparel,
    /// Footwear and accessories.
    Accessories,
    Only(ProductKind),
}

impl KindGroup {
    #[must_use]
    pub fn contains(self, kind: ProductKind) -> bool {
        match self {
            Self::Apparel => kind.is_apparel(),
            Self::Accessories => !kind.is_apparel(),
            Self::Only(k) => k == kind,
        }
    }

    /// Map a product-type keyword from a compound token (`men-jeans`,
    /// `women-heels`) to a group.
    fn from_type_keyword(keyword: &str) -> Option<Self> {
        let has = |needles: &[&str]| needles.iter().any(|n| keyword.contains(n));
        if has(&["shirt", "top"]) {
            Some(Self::Only(ProductKind::Topwear))
        } else if has(&["jean", "trouser", "short"]) {
            Some(Self::Only(ProductKind::Bottomwear))
        } else if has(&["shoe", "sandal", "flat", "heel"]) {
            Some(Self::Only(ProductKind::Footwear))
        } else if has(&["watch", "bag", "sunglass", "jewellery", "belt"])
            || keyword == "accessories"
        {
            Some(Self::Accessories)
        } else {
            None
        }
    }
}

/// Parsed category token.
///
/// The raw token is kept so criteria serialize back to what the shopper
/// selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    token: String,
    rule: CategoryRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CategoryRule {
    Any,
    Trending,
    Match {
        department: Option<Department>,
        kinds: Option<KindGroup>,
    },
}

impl CategoryFilter {
    /// Parse a category token such as `all`, `women`, `footwear`,
    /// `men-casual-shoes`.
    ///
    /// Unknown tokens are accepted and match every product.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim().to_lowercase();
        let rule = Self::rule_for(&token);
        Self { token, rule }
    }

    fn rule_for(token: &str) -> CategoryRule {
        let only = |department, kinds| CategoryRule::Match { department, kinds };
        match token {
            "" | "all" => CategoryRule::Any,
            "trending" => CategoryRule::Trending,
            "clothing" => only(None, Some(KindGroup::Apparel)),
            "accessories" => only(None, Some(KindGroup::Accessories)),
            "topwear" => only(None, Some(KindGroup::Only(ProductKind::Topwear))),
            "bottomwear" => only(None, Some(KindGroup::Only(ProductKind::Bottomwear))),
            "footwear" => only(None, Some(KindGroup::Only(ProductKind::Footwear))),
            _ => {
                // Department pages list clothing only
                if let Some(department) = Department::from_name(token) {
                    return only(Some(department), Some(KindGroup::Apparel));
                }
                match token.split_once('-') {
                    Some((dept, kind)) => {
                        let department = Department::from_keyword(dept);
                        let kinds = KindGroup::from_type_keyword(kind);
                        if department.is_none() && kinds.is_none() {
                            CategoryRule::Any
                        } else {
                            only(department, kinds)
                        }
                    }
                    None => CategoryRule::Any,
                }
            }
        }
    }

    /// The token as selected, lowercased.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether this filter restricts anything.
    #[must_use]
    pub const fn is_any(&self) -> bool {
        matches!(self.rule, CategoryRule::Any)
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self.rule {
            CategoryRule::Any => true,
            CategoryRule::Trending => product.price > Money::from_units(TRENDING_THRESHOLD),
            CategoryRule::Match { department, kinds } => {
                department.is_none_or(|d| d == product.category.department)
                    && kinds.is_none_or(|k| k.contains(product.category.kind))
            }
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::parse("all")
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.token)
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Self::parse(&token))
    }
}

/// Inclusive price range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[Money; 2]", into = "[Money; 2]")]
pub struct PriceRange {
    min: Money,
    max: Money,
}

impl PriceRange {
    /// Upper bound of the listing slider.
    pub const DEFAULT_MAX: i64 = 10_000;

    /// Build a range.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is negative or `min > max`.
    pub fn new(min: Money, max: Money) -> Result<Self, CriteriaError> {
        if min.is_negative() || max.is_negative() {
            return Err(CriteriaError::NegativeBound);
        }
        if min > max {
            return Err(CriteriaError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(&self) -> Money {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Money {
        self.max
    }

    #[must_use]
    pub fn contains(&self, price: Money) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Money::ZERO,
            max: Money::from_units(Self::DEFAULT_MAX),
        }
    }
}

impl TryFrom<[Money; 2]> for PriceRange {
    type Error = CriteriaError;

    fn try_from([min, max]: [Money; 2]) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<PriceRange> for [Money; 2] {
    fn from(range: PriceRange) -> Self {
        [range.min, range.max]
    }
}

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    /// Catalog order (id ascending).
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "price-low-high")]
    PriceLowHigh,
    #[serde(rename = "price-high-low")]
    PriceHighLow,
    #[serde(rename = "name-a-z")]
    NameAscending,
    #[serde(rename = "name-z-a")]
    NameDescending,
}

impl SortKey {
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::PriceLowHigh,
        Self::PriceHighLow,
        Self::NameAscending,
        Self::NameDescending,
    ];

    /// Wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceLowHigh => "price-low-high",
            Self::PriceHighLow => "price-high-low",
            Self::NameAscending => "name-a-z",
            Self::NameDescending => "name-z-a",
        }
    }
}

impl FromStr for SortKey {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| CriteriaError::UnknownSortKey(s.to_string()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combined category/price/search/sort parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    pub category: CategoryFilter,
    pub price_range: PriceRange,
    pub search_query: String,
    pub sort_by: SortKey,
}

/// Partial update merged over the current criteria; `None` fields keep their
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaPatch {
    #[serde(default)]
    pub category: Option<CategoryFilter>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub search_query: Option<String>,
    #[serde(default)]
    pub sort_by: Option<SortKey>,
}

impl CriteriaPatch {
    #[must_use]
    pub fn category(token: &str) -> Self {
        Self {
            category: Some(CategoryFilter::parse(token)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.price_range.is_none()
            && self.search_query.is_none()
            && self.sort_by.is_none()
    }
}

impl Criteria {
    /// Merge a patch over these criteria.
    pub fn apply_patch(&mut self, patch: CriteriaPatch) {
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(range) = patch.price_range {
            self.price_range = range;
        }
        if let Some(query) = patch.search_query {
            self.search_query = query;
        }
        if let Some(sort) = patch.sort_by {
            self.sort_by = sort;
        }
    }

    /// Criteria with only the given patch applied over defaults.
    #[must_use]
    pub fn from_patch(patch: CriteriaPatch) -> Self {
        let mut criteria = Self::default();
        criteria.apply_patch(patch);
        criteria
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{Category, ProductRecord};
    use crate::types::ProductId;

    fn product(id: i64, price: i64, department: Department, kind: ProductKind) -> Product {
        Product::try_from(ProductRecord {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            brand: String::new(),
            description: String::new(),
            price: Money::from_units(price),
            preview: String::new(),
            photos: vec![],
            is_accessory: !kind.is_apparel(),
            category: Some(Category::new(department, kind)),
        })
        .unwrap()
    }

    #[test]
    fn test_department_token() {
        let filter = CategoryFilter::parse("Women");
        assert_eq!(filter.token(), "women");
        assert!(filter.matches(&product(1, 10, Department::Women, ProductKind::Topwear)));
        assert!(!filter.matches(&product(2, 10, Department::Men, ProductKind::Topwear)));
    }

    #[test]
    fn test_department_token_excludes_accessories() {
        let filter = CategoryFilter::parse("men");
        assert!(filter.matches(&product(1, 10, Department::Men, ProductKind::Bottomwear)));
        assert!(!filter.matches(&product(3, 10, Department::Men, ProductKind::Accessory)));
        assert!(!filter.matches(&product(6, 10, Department::Men, ProductKind::Footwear)));
    }

    #[test]
    fn test_bare_boys_and_girls_are_unknown() {
        assert!(CategoryFilter::parse("boys").is_any());
        assert!(CategoryFilter::parse("girls").is_any());
        assert!(!CategoryFilter::parse("boys-shirts").is_any());
    }

    #[test]
    fn test_group_tokens() {
        let shoe = product(1, 10, Department::Men, ProductKind::Footwear);
        let tee = product(2, 10, Department::Men, ProductKind::Topwear);
        assert!(CategoryFilter::parse("accessories").matches(&shoe));
        assert!(!CategoryFilter::parse("accessories").matches(&tee));
        assert!(CategoryFilter::parse("clothing").matches(&tee));
        assert!(CategoryFilter::parse("footwear").matches(&shoe));
        assert!(!CategoryFilter::parse("topwear").matches(&shoe));
    }

    #[test]
    fn test_trending_is_strictly_above_threshold() {
        let filter = CategoryFilter::parse("trending");
        assert!(!filter.matches(&product(1, 1000, Department::Men, ProductKind::Topwear)));
        assert!(filter.matches(&product(2, 1001, Department::Men, ProductKind::Topwear)));
    }

    #[test]
    fn test_compound_tokens() {
        let heels = CategoryFilter::parse("women-heels");
        assert!(heels.matches(&product(1, 10, Department::Women, ProductKind::Footwear)));
        assert!(!heels.matches(&product(2, 10, Department::Women, ProductKind::Topwear)));
        assert!(!heels.matches(&product(3, 10, Department::Men, ProductKind::Footwear)));

        let casual = CategoryFilter::parse("men-casual-shoes");
        assert!(casual.matches(&product(4, 10, Department::Men, ProductKind::Footwear)));

        let tees = CategoryFilter::parse("men-tshirts");
        assert!(tees.matches(&product(5, 10, Department::Men, ProductKind::Topwear)));

        let watches = CategoryFilter::parse("men-watches");
        assert!(watches.matches(&product(6, 10, Department::Men, ProductKind::Accessory)));
        assert!(watches.matches(&product(7, 10, Department::Men, ProductKind::Footwear)));
    }

    #[test]
    fn test_boys_and_girls_map_to_kids() {
        let filter = CategoryFilter::parse("girls-tops");
        assert!(filter.matches(&product(1, 10, Department::Kids, ProductKind::Topwear)));
        assert!(!filter.matches(&product(2, 10, Department::Women, ProductKind::Topwear)));
    }

    #[test]
    fn test_unknown_type_keeps_department() {
        let filter = CategoryFilter::parse("women-dresses");
        assert!(filter.matches(&product(1, 10, Department::Women, ProductKind::Bottomwear)));
        assert!(!filter.matches(&product(2, 10, Department::Kids, ProductKind::Bottomwear)));
    }

    #[test]
    fn test_unknown_token_matches_everything() {
        let filter = CategoryFilter::parse("gadgets");
        assert!(filter.is_any());
        assert!(filter.matches(&product(1, 10, Department::Kids, ProductKind::Accessory)));
    }

    #[test]
    fn test_price_range_validation() {
        assert!(PriceRange::new(Money::from_units(5), Money::from_units(5)).is_ok());
        assert!(matches!(
            PriceRange::new(Money::from_units(10), Money::from_units(5)),
            Err(CriteriaError::InvertedRange { .. })
        ));
        assert_eq!(
            PriceRange::new(Money::from_units(-1), Money::from_units(5)),
            Err(CriteriaError::NegativeBound)
        );
    }

    #[test]
    fn test_price_range_deserialize_rejects_inverted() {
        assert!(serde_json::from_str::<PriceRange>("[0, 1000]").is_ok());
        assert!(serde_json::from_str::<PriceRange>("[1000, 0]").is_err());
    }

    #[test]
    fn test_sort_key_tokens() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_patch_merges() {
        let mut criteria = Criteria::default();
        criteria.apply_patch(CriteriaPatch {
            search_query: Some("shirt".into()),
            ..CriteriaPatch::default()
        });
        criteria.apply_patch(CriteriaPatch::category("men"));
        assert_eq!(criteria.search_query, "shirt");
        assert_eq!(criteria.category.token(), "men");
        assert_eq!(criteria.price_range, PriceRange::default());
        assert_eq!(criteria.sort_by, SortKey::Default);
    }
}
