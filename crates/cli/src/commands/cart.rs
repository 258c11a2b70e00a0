//! Cart commands.

use wardrobe_core::{Cart, CartSummary, ProductId};
use wardrobe_storefront::services;
use wardrobe_storefront::store::CartAction;

use super::{CliError, Context, Output};

fn write_summary(out: &Output, summary: &CartSummary) -> Result<(), CliError> {
    out.line(format_args!("Items:    {}", summary.item_count))?;
    out.line(format_args!("Subtotal: {}", summary.subtotal))?;
    if summary.free_shipping() {
        out.line("Shipping: Free")?;
    } else {
        out.line(format_args!("Shipping: {}", summary.shipping))?;
    }
    if let Some(promo) = summary.promo {
        out.line(format_args!("Discount: -{} ({})", summary.discount, promo.as_str()))?;
    }
    out.line(format_args!("Total:    {}", summary.total))
}

fn write_cart(out: &Output, cart: &Cart) -> Result<(), CliError> {
    let summary = CartSummary::compute(cart, None);
    if out.is_json() {
        return out.json(&serde_json::json!({ "cart": cart, "summary": summary }));
    }

    if cart.is_empty() {
        return out.line("Your cart is empty.");
    }
    for line in cart.items() {
        out.line(format_args!(
            "{:>5}  {:<36} {:>3} x {:>10} = {:>12}",
            line.id,
            line.name,
            line.quantity,
            line.price.to_string(),
            line.total_price.to_string()
        ))?;
    }
    out.line("")?;
    write_summary(out, &summary)
}

pub async fn show(ctx: &Context) -> Result<(), CliError> {
    let store = ctx.state.store().read().await;
    write_cart(&ctx.out, store.cart())
}

/// Add `quantity` units of a product.
pub async fn add(ctx: &Context, id: ProductId, quantity: u32) -> Result<(), CliError> {
    let product = ctx.state.catalog().product(id).await?;
    services::add_to_cart(ctx.state.store(), &product, quantity).await?;

    let store = ctx.state.store().read().await;
    ctx.out.notification(store.ui().notification.as_ref())?;
    write_cart(&ctx.out, store.cart())
}

/// Remove one unit of a product.
pub async fn remove(ctx: &Context, id: ProductId) -> Result<(), CliError> {
    let mut store = ctx.state.store().write().await;
    store.dispatch(CartAction::RemoveFromCart(id))?;
    write_cart(&ctx.out, store.cart())
}

/// Remove a product's whole line.
pub async fn remove_line(ctx: &Context, id: ProductId) -> Result<(), CliError> {
    let mut store = ctx.state.store().write().await;
    store.dispatch(CartAction::RemoveItemCompletely(id))?;
    write_cart(&ctx.out, store.cart())
}

pub async fn clear(ctx: &Context) -> Result<(), CliError> {
    let mut store = ctx.state.store().write().await;
    let _ = store.dispatch(CartAction::ClearCart);
    write_cart(&ctx.out, store.cart())
}

/// Show totals, optionally with a promo code applied.
pub async fn summary(ctx: &Context, promo: Option<&str>) -> Result<(), CliError> {
    let promo = match promo {
        Some(code) => Some(services::apply_promo(ctx.state.store(), code).await?),
        None => None,
    };

    let store = ctx.state.store().read().await;
    let summary = store.summary(promo);
    if ctx.out.is_json() {
        return ctx.out.json(&summary);
    }
    ctx.out.notification(store.ui().notification.as_ref())?;
    write_summary(&ctx.out, &summary)
}
