//! Checkout command.
//!
//! The form is a YAML file using the same field names as the checkout API:
//!
//! ```yaml
//! firstName: Asha
//! lastName: Rao
//! email: asha@example.com
//! phone: "9999999999"
//! address: 12 MG Road
//! city: Pune
//! state: MH
//! zipCode: "411001"
//! country: India
//! paymentMethod: cashOnDelivery
//! ```

use std::path::Path;

use wardrobe_core::{CheckoutForm, PromoCode};
use wardrobe_storefront::services::{self, CheckoutError};

use super::{CliError, Context};

/// Read a checkout form from a YAML file.
pub fn read_form(path: &Path) -> Result<CheckoutForm, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Form {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_yaml::from_str(&raw)?)
}

/// Validate the form and place an order for the current cart.
pub async fn place_order(ctx: &Context, path: &Path, promo: Option<&str>) -> Result<(), CliError> {
    let form = read_form(path)?;
    let promo = promo.map(str::parse::<PromoCode>).transpose()?;

    let confirmation = services::place_order(ctx.state.store(), ctx.state.orders(), &form, promo)
        .await
        .inspect_err(|e| {
            if let CheckoutError::Validation(errors) = e {
                for error in &errors.errors {
                    tracing::error!(field = error.field, "{}", error.message);
                }
            }
        })?;

    if ctx.out.is_json() {
        return ctx.out.json(&confirmation);
    }
    ctx.out.line("Your order has been placed successfully!")?;
    ctx.out
        .line(format_args!("Order number: {}", confirmation.order_number))?;
    ctx.out.line(format_args!("Total paid:   {}", confirmation.summary.total))?;
    ctx.out.line(format_args!(
        "Confirmation sent to {}",
        confirmation.email.as_str()
    ))
}
