//! Application store.
//!
//! One [`Store`] owns all client state, split into four slices. State only
//! changes through [`Store::dispatch`]: each action is reduced by its slice,
//! then the storage keys the action touched are flushed.
//!
//! # Persistence
//!
//! | Key        | Written on                      | Removed on                   |
//! |------------|---------------------------------|------------------------------|
//! | `cart`     | any cart mutation               | `ClearCart`, emptying order  |
//! | `user`     | `AuthSucceeded`                 | `Logout`                     |
//! | `darkMode` | `ToggleDarkMode`, `SetDarkMode` | never                        |
//!
//! Storage failures are logged and never fail a dispatch; the in-memory state
//! stays authoritative for the rest of the process.

pub mod auth;
pub mod cart;
pub mod products;
pub mod ui;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use wardrobe_core::{Cart, CartError, CartSnapshot, CartSummary, PromoCode, UserSession};

pub use auth::{AuthAction, AuthState};
pub use cart::CartAction;
pub use products::{ProductsAction, ProductsState};
pub use ui::{AuthModalMode, Notification, NotificationStatus, UiAction, UiState};

use crate::storage::{LocalStorage, keys};

/// Any store action, tagged by slice.
#[derive(Debug, Clone)]
pub enum Action {
    Products(ProductsAction),
    Cart(CartAction),
    Auth(AuthAction),
    Ui(UiAction),
}

impl From<ProductsAction> for Action {
    fn from(action: ProductsAction) -> Self {
        Self::Products(action)
    }
}

impl From<CartAction> for Action {
    fn from(action: CartAction) -> Self {
        Self::Cart(action)
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Self::Auth(action)
    }
}

impl From<UiAction> for Action {
    fn from(action: UiAction) -> Self {
        Self::Ui(action)
    }
}

/// The application state.
pub struct Store {
    products: ProductsState,
    cart: Cart,
    auth: AuthState,
    ui: UiState,
    storage: Arc<dyn LocalStorage>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("products", &self.products.products.len())
            .field("cart", &self.cart)
            .field("auth", &self.auth)
            .field("ui", &self.ui)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Build the store from persisted state.
    ///
    /// Reads `cart`, `user`, and `darkMode` once. Missing keys fall back to
    /// defaults; unreadable or corrupt values are logged and ignored.
    #[must_use]
    pub fn hydrate(storage: Arc<dyn LocalStorage>) -> Self {
        let cart = read_json::<CartSnapshot>(storage.as_ref(), keys::CART)
            .map(Cart::from_snapshot)
            .unwrap_or_default();
        let user = read_json::<UserSession>(storage.as_ref(), keys::USER);
        let dark_mode = read_raw(storage.as_ref(), keys::DARK_MODE).and_then(|raw| {
            match raw.trim() {
                "true" => Some(true),
                "false" => Some(false),
                other => {
                    tracing::warn!(
                        key = keys::DARK_MODE,
                        value = %other,
                        "Ignoring unreadable theme preference"
                    );
                    None
                }
            }
        });

        let ui = UiState {
            dark_mode: dark_mode.unwrap_or(true),
            ..UiState::default()
        };

        tracing::debug!(
            cart_lines = cart.items().len(),
            signed_in = user.is_some(),
            dark_mode = ui.dark_mode,
            "Store hydrated"
        );

        Self {
            products: ProductsState::default(),
            cart,
            auth: AuthState {
                user,
                ..AuthState::default()
            },
            ui,
            storage,
        }
    }

    /// Apply an action and flush whatever it touched.
    ///
    /// # Errors
    ///
    /// Returns the `CartError` when a cart action is rejected: a removal that
    /// names a product with no cart line, or an add with a negative price or
    /// an overflowing total. The cart is unchanged and an error notification
    /// is raised.
    pub fn dispatch(&mut self, action: impl Into<Action>) -> Result<(), CartError> {
        match action.into() {
            Action::Products(action) => self.products.reduce(action),
            Action::Cart(action) => {
                let persist = action.mutates();
                let ordered = matches!(action, CartAction::RemoveOrdered(_));
                let clearing = matches!(action, CartAction::ClearCart);
                if let Err(err) = cart::reduce(&mut self.cart, action) {
                    tracing::debug!(error = %err, "Cart action rejected");
                    self.ui.reduce(UiAction::ShowNotification(rejection_notice(&err)));
                    return Err(err);
                }
                if clearing || (ordered && self.cart.is_empty()) {
                    self.remove(keys::CART);
                } else if persist {
                    self.flush_cart();
                }
            }
            Action::Auth(action) => {
                let logout = matches!(action, AuthAction::Logout);
                let succeeded = matches!(action, AuthAction::AuthSucceeded(_));
                self.auth.reduce(action);
                if logout {
                    self.remove(keys::USER);
                } else if succeeded {
                    self.flush_user();
                }
            }
            Action::Ui(action) => {
                let theme = action.touches_theme();
                self.ui.reduce(action);
                if theme {
                    self.write(keys::DARK_MODE, if self.ui.dark_mode { "true" } else { "false" });
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn products(&self) -> &ProductsState {
        &self.products
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthState {
        &self.auth
    }

    #[must_use]
    pub const fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Cart totals with an optional promo applied.
    #[must_use]
    pub fn summary(&self, promo: Option<PromoCode>) -> CartSummary {
        CartSummary::compute(&self.cart, promo)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn flush_cart(&self) {
        match serde_json::to_string(&self.cart.snapshot()) {
            Ok(json) => self.write(keys::CART, &json),
            Err(e) => tracing::warn!(error = %e, "Failed to encode cart"),
        }
    }

    fn flush_user(&self) {
        let Some(user) = &self.auth.user else {
            return;
        };
        match serde_json::to_string(user) {
            Ok(json) => self.write(keys::USER, &json),
            Err(e) => tracing::warn!(error = %e, "Failed to encode user session"),
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            tracing::warn!(key, error = %e, "Failed to persist state");
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.storage.remove(key) {
            tracing::warn!(key, error = %e, "Failed to remove persisted state");
        }
    }
}

fn rejection_notice(err: &CartError) -> Notification {
    match err {
        CartError::LineNotFound(_) => {
            Notification::error("Item Not In Cart", "That item is no longer in your cart.")
        }
        CartError::NegativePrice(_) | CartError::AmountOverflow(_) => {
            Notification::error("Could Not Add Item", "That item could not be added to your cart.")
        }
    }
}

fn read_raw(storage: &dyn LocalStorage, key: &str) -> Option<String> {
    storage
        .get(key)
        .inspect_err(|e| tracing::warn!(key, error = %e, "Failed to read persisted state"))
        .ok()
        .flatten()
}

fn read_json<T: DeserializeOwned>(storage: &dyn LocalStorage, key: &str) -> Option<T> {
    let raw = read_raw(storage, key)?;
    serde_json::from_str(&raw)
        .inspect_err(|e| tracing::warn!(key, error = %e, "Ignoring corrupt persisted state"))
        .ok()
}
