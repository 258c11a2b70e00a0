//! Wardrobe Core - Storefront domain library.
//!
//! This crate holds the domain shared by every Wardrobe component:
//! - `storefront` - Application store, catalog client, and JSON API server
//! - `cli` - Command-line front end over the same store
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no storage
//! access, no HTTP clients. Everything here is deterministic given its inputs.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, money, and emails
//! - [`catalog`] - Products and their explicit taxonomy
//! - [`criteria`] - Filter criteria for the listing page
//! - [`derive`] - The filter/sort pipeline
//! - [`cart`] - Cart aggregation
//! - [`summary`] - Cart totals, shipping, and promo codes
//! - [`checkout`] - Checkout form validation and order confirmations
//! - [`session`] - Signed-in user session

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod criteria;
pub mod derive;
pub mod session;
pub mod summary;
pub mod types;

pub use cart::{Cart, CartError, CartItem, CartLine, CartSnapshot};
pub use catalog::{Category, Department, Product, ProductError, ProductKind, ProductRecord};
pub use checkout::{
    CheckoutForm, Country, OrderConfirmation, OrderNumber, OrderRequest, PaymentMethod,
    ValidationErrors,
};
pub use criteria::{CategoryFilter, Criteria, CriteriaError, CriteriaPatch, PriceRange, SortKey};
pub use session::{LoginRequest, RegisterRequest, UserId, UserSession};
pub use summary::{CartSummary, PromoCode, PromoError};
pub use types::*;
