//! Catalog entities.
//!
//! A [`Product`] is immutable once ingested. Every product carries an explicit
//! [`Category`]; records from the remote catalog that arrive without one are
//! classified on ingestion by [`Category::placeholder_for`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Money, ProductId};

/// Errors ingesting a catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error("product {id} has price {price}, outside 0 to {max}")]
    PriceOutOfRange { id: ProductId, price: Money, max: Money },
}

/// Shopper department a product is merchandised under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Men,
    Women,
    Kids,
}

impl Department {
    /// Parse a department name used as a whole category token.
    #[must_use]
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "men" => Some(Self::Men),
            "women" => Some(Self::Women),
            "kids" => Some(Self::Kids),
            _ => None,
        }
    }

    /// Parse the department part of a compound category token.
    ///
    /// `boys` and `girls` are merchandised under kids.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "boys" | "girls" => Some(Self::Kids),
            _ => Self::from_name(s),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Kids => "kids",
        }
    }
}

/// What kind of item a product is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Topwear,
    Bottomwear,
    Footwear,
    Accessory,
}

impl ProductKind {
    /// Clothing proper, as opposed to footwear and accessories.
    #[must_use]
    pub const fn is_apparel(self) -> bool {
        matches!(self, Self::Topwear | Self::Bottomwear)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Topwear => "topwear",
            Self::Bottomwear => "bottomwear",
            Self::Footwear => "footwear",
            Self::Accessory => "accessory",
        }
    }
}

/// Explicit taxonomy attribute of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub department: Department,
    pub kind: ProductKind,
}

impl Category {
    #[must_use]
    pub const fn new(department: Department, kind: ProductKind) -> Self {
        Self { department, kind }
    }

    /// Classify a product that arrived without taxonomy.
    ///
    /// The mock catalog has no category field, so products are partitioned by
    /// id: `id mod 3` picks the department, id parity picks the kind within
    /// the accessory flag (apparel: even topwear, odd bottomwear; accessories:
    /// even footwear, odd accessory). This is the only place that scheme
    /// exists; filtering reads the resulting attribute.
    #[must_use]
    pub const fn placeholder_for(id: ProductId, is_accessory: bool) -> Self {
        let id = id.as_i64();
        let department = match id.rem_euclid(3) {
            0 => Department::Men,
            1 => Department::Women,
            _ => Department::Kids,
        };
        let even = id.rem_euclid(2) == 0;
        let kind = match (is_accessory, even) {
            (false, true) => ProductKind::Topwear,
            (false, false) => ProductKind::Bottomwear,
            (true, true) => ProductKind::Footwear,
            (true, false) => ProductKind::Accessory,
        };
        Self { department, kind }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ProductRecord")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: Money,
    /// Preview image URL.
    pub preview: String,
    /// Gallery image URLs.
    pub photos: Vec<String>,
    pub is_accessory: bool,
    pub category: Category,
}

/// Product as served by the catalog endpoint.
///
/// Text fields missing from a record default to empty rather than failing
/// the whole listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub is_accessory: bool,
    #[serde(default)]
    pub category: Option<Category>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ProductError;

    /// Classify the record and check its price is within `0..=MAX_PRICE`.
    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let max = Money::from_units(Self::MAX_PRICE);
        if record.price.is_negative() || record.price > max {
            return Err(ProductError::PriceOutOfRange {
                id: record.id,
                price: record.price,
                max,
            });
        }
        let category = record
            .category
            .unwrap_or_else(|| Category::placeholder_for(record.id, record.is_accessory));
        Ok(Self {
            id: record.id,
            name: record.name,
            brand: record.brand,
            description: record.description,
            price: record.price,
            preview: record.preview,
            photos: record.photos,
            is_accessory: record.is_accessory,
            category,
        })
    }
}

impl Product {
    /// Highest unit price accepted from the catalog.
    pub const MAX_PRICE: i64 = 10_000_000;

    /// Case-insensitive substring match against name, description, and brand.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        [&self.name, &self.description, &self.brand]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_category_is_classified() {
        let json = r#"{
            "id": "4",
            "name": "Linen Shirt",
            "brand": "Acme",
            "description": "Breezy",
            "price": 799,
            "preview": "https://img/4.jpg",
            "photos": ["https://img/4a.jpg"],
            "isAccessory": false
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(4));
        assert_eq!(product.price, Money::from_units(799));
        assert_eq!(
            product.category,
            Category::new(Department::Women, ProductKind::Topwear)
        );
    }

    #[test]
    fn test_explicit_category_wins() {
        let json = r#"{
            "id": 4, "name": "Boots", "price": "2500", "isAccessory": true,
            "category": {"department": "men", "kind": "footwear"}
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(
            product.category,
            Category::new(Department::Men, ProductKind::Footwear)
        );
        assert!(product.brand.is_empty());
    }

    #[test]
    fn test_placeholder_partitions() {
        let c = Category::placeholder_for(ProductId::new(3), false);
        assert_eq!(c.department, Department::Men);
        assert_eq!(c.kind, ProductKind::Bottomwear);

        let c = Category::placeholder_for(ProductId::new(5), true);
        assert_eq!(c.department, Department::Kids);
        assert_eq!(c.kind, ProductKind::Accessory);

        let c = Category::placeholder_for(ProductId::new(-2), true);
        assert_eq!(c.department, Department::Women);
        assert_eq!(c.kind, ProductKind::Footwear);
    }

    #[test]
    fn test_serializes_round_trip_through_record() {
        let product = Product::try_from(ProductRecord {
            id: ProductId::new(9),
            name: "Tote".into(),
            brand: "Bagco".into(),
            description: String::new(),
            price: Money::from_units(1200),
            preview: String::new(),
            photos: vec![],
            is_accessory: true,
            category: None,
        })
        .unwrap();
        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains("\"isAccessory\":true"));
        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_matches_lowercase() {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"name":"Denim SHIRT","brand":"Levis","description":"blue","price":1}"#,
        )
        .unwrap();
        assert!(product.matches_lowercase("shirt"));
        assert!(product.matches_lowercase("levi"));
        assert!(!product.matches_lowercase("jacket"));
    }

    #[test]
    fn test_out_of_range_prices_are_rejected() {
        let negative = r#"{"id": 7, "name": "Refund", "price": -1}"#;
        let err = serde_json::from_str::<Product>(negative).unwrap_err();
        assert!(err.to_string().contains("product 7 has price Rs. -1"));

        let vault = r#"{"id": 8, "name": "Vault", "price": "50000000000000000000000000000"}"#;
        let record: ProductRecord = serde_json::from_str(vault).unwrap();
        assert!(matches!(
            Product::try_from(record),
            Err(ProductError::PriceOutOfRange { id, .. }) if id == ProductId::new(8)
        ));

        let edge = format!(r#"{{"id": 9, "name": "Couture", "price": {}}}"#, Product::MAX_PRICE);
        assert!(serde_json::from_str::<Product>(&edge).is_ok());
    }
}
