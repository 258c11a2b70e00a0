//! Cart aggregation.
//!
//! A [`Cart`] holds at most one [`CartLine`] per product id, in insertion
//! order. After every operation:
//!
//! - each line's `total_price` is `price × quantity`, with `quantity >= 1`
//! - `total_quantity` is the sum of line quantities
//! - `total_amount` is the sum of line totals, never negative
//!
//! The aggregates are private and recomputed from the lines, so no caller can
//! leave them inconsistent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::types::{Money, ProductId};

/// Errors from cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// No line exists for the product id; the cart is unchanged.
    #[error("no cart line for product {0}")]
    LineNotFound(ProductId),

    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),

    /// The new total would not fit in a decimal; the cart is unchanged.
    #[error("cart total overflows at product {0}")]
    AmountOverflow(ProductId),
}

/// The product fields copied into a cart line when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: Money,
    pub preview: String,
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price,
            preview: product.preview.clone(),
        }
    }
}

/// One product in the cart at some quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub price: Money,
    #[serde(default)]
    pub preview: String,
    pub quantity: u32,
    pub total_price: Money,
}

impl CartLine {
    fn new(item: CartItem, quantity: u32) -> Result<Self, CartError> {
        let mut line = Self {
            id: item.id,
            name: item.name,
            brand: item.brand,
            price: item.price,
            preview: item.preview,
            quantity: 0,
            total_price: Money::ZERO,
        };
        line.total_price = line.priced_at(quantity)?;
        line.quantity = quantity;
        Ok(line)
    }

    fn priced_at(&self, quantity: u32) -> Result<Money, CartError> {
        self.price
            .checked_mul(quantity)
            .ok_or(CartError::AmountOverflow(self.id))
    }
}

impl From<CartLine> for CartItem {
    fn from(line: CartLine) -> Self {
        Self {
            id: line.id,
            name: line.name,
            brand: line.brand,
            price: line.price,
            preview: line.preview,
        }
    }
}

/// Persisted form of a cart, stored under the `cart` key.
///
/// Aggregates are written for readers of the raw value but ignored on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    #[serde(default)]
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub total_quantity: u32,
    #[serde(default)]
    pub total_amount: Money,
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartLine>,
    total_quantity: u32,
    total_amount: Money,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from its persisted form.
    ///
    /// Line totals and aggregates are recomputed and repeated ids are merged
    /// into the first occurrence. Lines with zero quantity, a negative price,
    /// or a total that overflows are dropped.
    #[must_use]
    pub fn from_snapshot(snapshot: CartSnapshot) -> Self {
        let mut cart = Self::default();
        for line in snapshot.items {
            let quantity = line.quantity;
            let _ = cart.add_many(CartItem::from(line), quantity);
        }
        cart
    }

    /// Persisted form of this cart.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total_quantity: self.total_quantity,
            total_amount: self.total_amount,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.items.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub const fn total_quantity(&self) -> u32 {
        self.total_quantity
    }

    #[must_use]
    pub const fn total_amount(&self) -> Money {
        self.total_amount
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit: bump the existing line or append a new one at quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NegativePrice`] or [`CartError::AmountOverflow`];
    /// the cart is unchanged.
    pub fn add(&mut self, item: CartItem) -> Result<(), CartError> {
        self.add_many(item, 1)
    }

    /// Add `quantity` units of one product (the detail page quantity picker).
    ///
    /// # Errors
    ///
    /// Same as [`Cart::add`].
    pub fn add_many(&mut self, item: CartItem, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Ok(());
        }
        if item.price.is_negative() {
            return Err(CartError::NegativePrice(item.id));
        }
        match self.position(item.id) {
            Ok(index) => {
                let current = self.items.get(index).map_or(0, |l| l.quantity);
                self.set_line_quantity(index, current.saturating_add(quantity))?;
            }
            Err(_) => {
                let line = CartLine::new(item, quantity)?;
                self.total_with(line.id, line.total_price)?;
                self.items.push(line);
                self.recompute();
            }
        }
        Ok(())
    }

    /// Remove one unit, deleting the line when it reaches zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line has this id.
    pub fn remove_one(&mut self, id: ProductId) -> Result<(), CartError> {
        let index = self.position(id)?;
        self.reduce_line(index, 1)
    }

    /// Take the units of a placed order out of the cart.
    ///
    /// Each ordered line lowers the matching cart line by its quantity and
    /// lines that reach zero are deleted. Units added after the order was
    /// taken stay in the cart.
    pub fn remove_ordered(&mut self, ordered: &[CartLine]) {
        for placed in ordered {
            if let Ok(index) = self.position(placed.id) {
                let _ = self.reduce_line(index, placed.quantity);
            }
        }
    }

    /// Remove the whole line for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line has this id.
    pub fn remove_line(&mut self, id: ProductId) -> Result<CartLine, CartError> {
        let index = self.position(id)?;
        let line = self.items.remove(index);
        self.recompute();
        Ok(line)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    fn position(&self, id: ProductId) -> Result<usize, CartError> {
        self.items
            .iter()
            .position(|l| l.id == id)
            .ok_or(CartError::LineNotFound(id))
    }

    fn reduce_line(&mut self, index: usize, by: u32) -> Result<(), CartError> {
        let remaining = self
            .items
            .get(index)
            .map_or(0, |l| l.quantity.saturating_sub(by));
        if remaining == 0 {
            self.items.remove(index);
            self.recompute();
            Ok(())
        } else {
            self.set_line_quantity(index, remaining)
        }
    }

    /// Reprice the line at `index`, checking the cart total before touching it.
    fn set_line_quantity(&mut self, index: usize, quantity: u32) -> Result<(), CartError> {
        let Some(line) = self.items.get(index) else {
            return Ok(());
        };
        let total_price = line.priced_at(quantity)?;
        self.total_with(line.id, total_price)?;
        if let Some(line) = self.items.get_mut(index) {
            line.quantity = quantity;
            line.total_price = total_price;
        }
        self.recompute();
        Ok(())
    }

    /// Cart total if the line for `id` were priced at `line_total`.
    fn total_with(&self, id: ProductId, line_total: Money) -> Result<Money, CartError> {
        self.items
            .iter()
            .filter(|l| l.id != id)
            .try_fold(line_total, |acc, l| acc.checked_add(l.total_price))
            .ok_or(CartError::AmountOverflow(id))
    }

    fn recompute(&mut self) {
        self.total_quantity = self
            .items
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity));
        self.total_amount = self.items.iter().map(|l| l.total_price).sum();
    }
}
