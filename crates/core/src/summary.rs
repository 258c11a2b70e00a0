//! Order summary shown beside the cart and at checkout.

use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::Cart;
use crate::types::Money;

/// Subtotals strictly above this ship free.
const FREE_SHIPPING_ABOVE: i64 = 1000;

/// Flat shipping charge below the free-shipping threshold.
const SHIPPING_FEE: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromoError {
    #[error("the promo code you entered is invalid or expired")]
    Invalid(String),
}

/// Recognised promotional codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromoCode {
    /// 20% off the subtotal.
    #[serde(rename = "DISCOUNT20")]
    Discount20,
}

impl PromoCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discount20 => "DISCOUNT20",
        }
    }

    /// Discount for `subtotal`, rounded to whole units (half away from zero).
    #[must_use]
    pub fn discount_on(self, subtotal: Money) -> Money {
        let rate = match self {
            Self::Discount20 => Decimal::new(20, 2),
        };
        let raw = subtotal.amount() * rate;
        Money::new(raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl FromStr for PromoCode {
    type Err = PromoError;

    /// Codes are matched case-insensitively after trimming.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DISCOUNT20" => Ok(Self::Discount20),
            _ => Err(PromoError::Invalid(s.to_string())),
        }
    }
}

/// Derived totals for a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub item_count: u32,
    pub subtotal: Money,
    pub shipping: Money,
    pub discount: Money,
    pub promo: Option<PromoCode>,
    pub total: Money,
}

impl CartSummary {
    /// Compute the summary for `cart` with an optional applied promo code.
    ///
    /// Shipping is zero for an empty cart, free above 1000, otherwise 100.
    #[must_use]
    pub fn compute(cart: &Cart, promo: Option<PromoCode>) -> Self {
        let subtotal = cart.total_amount();
        let shipping = if subtotal.is_zero() || subtotal > Money::from_units(FREE_SHIPPING_ABOVE) {
            Money::ZERO
        } else {
            Money::from_units(SHIPPING_FEE)
        };
        let discount = promo.map_or(Money::ZERO, |code| code.discount_on(subtotal));
        let total = (subtotal + shipping).saturating_sub(discount);

        Self {
            item_count: cart.total_quantity(),
            subtotal,
            shipping,
            discount,
            promo,
            total,
        }
    }

    /// Whether shipping was waived.
    #[must_use]
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
