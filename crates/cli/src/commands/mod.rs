//! CLI command implementations.
//!
//! Every command runs against a freshly hydrated store and writes its result
//! to stdout; logs go to stderr.

pub mod account;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod theme;

use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use wardrobe_core::{CartError, CriteriaError, PromoError};
use wardrobe_storefront::catalog::CatalogError;
use wardrobe_storefront::config::ConfigError;
use wardrobe_storefront::services::CheckoutError;
use wardrobe_storefront::services::auth::AuthError;
use wardrobe_storefront::state::AppState;
use wardrobe_storefront::storage::StorageError;
use wardrobe_storefront::store::Notification;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Promo(#[from] PromoError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Checkout form file could not be read.
    #[error("Failed to read checkout form {path}: {source}")]
    Form {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid checkout form: {0}")]
    FormSyntax(#[from] serde_yaml::Error),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Stdout writer in text or JSON mode.
pub struct Output {
    json: bool,
}

impl Output {
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Write one line of text.
    pub fn line(&self, text: impl Display) -> Result<(), CliError> {
        writeln!(std::io::stdout().lock(), "{text}")?;
        Ok(())
    }

    /// Write `value` as pretty JSON.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), CliError> {
        let encoded = serde_json::to_string_pretty(value)?;
        self.line(encoded)
    }

    /// Write the notification banner an action raised, if any.
    pub fn notification(&self, notification: Option<&Notification>) -> Result<(), CliError> {
        match notification {
            Some(n) if !self.json => self.line(format_args!("{}: {}", n.title, n.message)),
            _ => Ok(()),
        }
    }
}

/// Everything a command needs.
pub struct Context {
    pub state: AppState,
    pub out: Output,
}
