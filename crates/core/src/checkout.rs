//! Checkout form, validation, and order confirmation types.
//!
//! Validation is synchronous and happens before anything is submitted. A form
//! that fails validation yields every failing field with its message at once.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartLine;
use crate::summary::CartSummary;
use crate::types::Email;

// =============================================================================
// Form
// =============================================================================

/// How the shopper intends to pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Paypal,
    CashOnDelivery,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "creditCard",
            Self::Paypal => "paypal",
            Self::CashOnDelivery => "cashOnDelivery",
        }
    }

    /// Whether card details must be supplied.
    #[must_use]
    pub const fn requires_card(self) -> bool {
        matches!(self, Self::CreditCard)
    }
}

/// Shipping destinations offered at checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    #[default]
    India,
    #[serde(rename = "USA")]
    Usa,
    #[serde(rename = "UK")]
    Uk,
    Canada,
    Australia,
}

impl Country {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::India => "India",
            Self::Usa => "USA",
            Self::Uk => "UK",
            Self::Canada => "Canada",
            Self::Australia => "Australia",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shipping and payment details entered at checkout.
///
/// Missing fields deserialize as empty strings so that validation, not the
/// decoder, reports them.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: Country,
    pub payment_method: PaymentMethod,
    pub card_number: String,
    pub card_name: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl fmt::Debug for CheckoutForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("city", &self.city)
            .field("country", &self.country)
            .field("payment_method", &self.payment_method)
            .field("card_number", &"[REDACTED]")
            .field("cvv", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Validation
// =============================================================================

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Form field name as submitted (`camelCase`).
    pub field: &'static str,
    pub message: &'static str,
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{} checkout field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }
}

/// A form that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedCheckout {
    pub customer_name: String,
    pub email: Email,
    pub country: Country,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Check every required field.
    ///
    /// Address fields are always required; card fields only when paying by
    /// credit card. Fields are trimmed before checking.
    ///
    /// # Errors
    ///
    /// Returns all failing fields together.
    pub fn validate(&self) -> Result<ValidatedCheckout, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let required = [
            ("firstName", &self.first_name, "First name is required"),
            ("lastName", &self.last_name, "Last name is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.push(field, message);
            }
        }

        let email = if self.email.trim().is_empty() {
            errors.push("email", "Email is required");
            None
        } else {
            match Email::parse(&self.email) {
                Ok(email) => Some(email),
                Err(_) => {
                    errors.push("email", "Email is invalid");
                    None
                }
            }
        };

        let address = [
            ("phone", &self.phone, "Phone number is required"),
            ("address", &self.address, "Address is required"),
            ("city", &self.city, "City is required"),
            ("state", &self.state, "State is required"),
            ("zipCode", &self.zip_code, "ZIP code is required"),
        ];
        for (field, value, message) in address {
            if value.trim().is_empty() {
                errors.push(field, message);
            }
        }

        if self.payment_method.requires_card() {
            let card = [
                ("cardNumber", &self.card_number, "Card number is required"),
                ("cardName", &self.card_name, "Name on card is required"),
                ("expiryDate", &self.expiry_date, "Expiry date is required"),
                ("cvv", &self.cvv, "CVV is required"),
            ];
            for (field, value, message) in card {
                if value.trim().is_empty() {
                    errors.push(field, message);
                }
            }
        }

        match email {
            Some(email) if errors.is_empty() => Ok(ValidatedCheckout {
                customer_name: format!("{} {}", self.first_name.trim(), self.last_name.trim()),
                email,
                country: self.country,
                payment_method: self.payment_method,
            }),
            _ => Err(errors),
        }
    }
}

// =============================================================================
// Confirmation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("order numbers are six digits between 100000 and 999999, got {0}")]
pub struct OrderNumberError(u32);

/// Order reference shown on the confirmation page: `ORD-` and six digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderNumber(u32);

impl OrderNumber {
    pub const MIN: u32 = 100_000;
    pub const MAX: u32 = 999_999;

    /// # Errors
    ///
    /// Returns an error if `digits` is not a six-digit number.
    pub const fn new(digits: u32) -> Result<Self, OrderNumberError> {
        if digits < Self::MIN || digits > Self::MAX {
            return Err(OrderNumberError(digits));
        }
        Ok(Self(digits))
    }

    #[must_use]
    pub const fn digits(self) -> u32 {
        self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ORD-{}", self.0)
    }
}

impl FromStr for OrderNumber {
    type Err = OrderNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("ORD-")
            .and_then(|d| d.parse::<u32>().ok())
            .ok_or(OrderNumberError(0))?;
        Self::new(digits)
    }
}

impl Serialize for OrderNumber {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OrderNumber {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// What gets handed to the order provider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub customer_name: String,
    pub email: Email,
    pub country: Country,
    pub payment_method: PaymentMethod,
    pub items: Vec<CartLine>,
    pub summary: CartSummary,
}

/// Result of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_number: OrderNumber,
    pub placed_at: DateTime<Utc>,
    pub customer_name: String,
    pub email: Email,
    pub payment_method: PaymentMethod,
    pub items: Vec<CartLine>,
    pub summary: CartSummary,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled() -> CheckoutForm {
        CheckoutForm {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            email: "asha@example.com".into(),
            phone: "9999999999".into(),
            address: "12 MG Road".into(),
            city: "Pune".into(),
            state: "MH".into(),
            zip_code: "411001".into(),
            country: Country::India,
            payment_method: PaymentMethod::CreditCard,
            card_number: "4111111111111111".into(),
            card_name: "Asha Rao".into(),
            expiry_date: "12/30".into(),
            cvv: "123".into(),
        }
    }

    #[test]
    fn test_complete_form_validates() {
        let checkout = filled().validate().unwrap();
        assert_eq!(checkout.customer_name, "Asha Rao");
        assert_eq!(checkout.email.as_str(), "asha@example.com");
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = CheckoutForm::default().validate().unwrap_err();
        assert_eq!(errors.errors.len(), 12);
        assert_eq!(errors.get("firstName"), Some("First name is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("zipCode"), Some("ZIP code is required"));
        assert_eq!(errors.get("cvv"), Some("CVV is required"));
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut form = filled();
        form.city = "   ".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.errors, vec![FieldError {
            field: "city",
            message: "City is required",
        }]);
    }

    #[test]
    fn test_malformed_email() {
        let mut form = filled();
        form.email = "asha@example".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is invalid"));
    }

    #[test]
    fn test_card_fields_only_for_credit_card() {
        let mut form = filled();
        form.card_number.clear();
        form.cvv.clear();
        assert!(form.validate().is_err());

        form.payment_method = PaymentMethod::CashOnDelivery;
        assert!(form.validate().is_ok());
        form.payment_method = PaymentMethod::Paypal;
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_form_deserializes_from_camel_case() {
        let form: CheckoutForm = serde_json::from_str(
            r#"{"firstName":"A","zipCode":"1","paymentMethod":"cashOnDelivery","country":"USA"}"#,
        )
        .unwrap();
        assert_eq!(form.zip_code, "1");
        assert_eq!(form.payment_method, PaymentMethod::CashOnDelivery);
        assert_eq!(form.country, Country::Usa);
        assert!(form.last_name.is_empty());
    }

    #[test]
    fn test_debug_redacts_card() {
        let debug = format!("{:?}", filled());
        assert!(!debug.contains("4111"));
        assert!(!debug.contains("123\""));
    }

    #[test]
    fn test_order_number_format() {
        let number = OrderNumber::new(123_456).unwrap();
        assert_eq!(number.to_string(), "ORD-123456");
        assert_eq!("ORD-123456".parse::<OrderNumber>().unwrap(), number);
        assert!(OrderNumber::new(99_999).is_err());
        assert!(OrderNumber::new(1_000_000).is_err());
        assert!("123456".parse::<OrderNumber>().is_err());
    }
}
