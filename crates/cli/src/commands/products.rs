//! Catalog browsing commands.

use wardrobe_core::{Product, ProductId};
use wardrobe_storefront::routes::products::ListingQuery;
use wardrobe_storefront::services;
use wardrobe_storefront::store::ProductsAction;

use super::{CliError, Context, Output};

fn write_product_row(out: &Output, product: &Product) -> Result<(), CliError> {
    out.line(format_args!(
        "{:>5}  {:<36} {:<20} {:>12}",
        product.id,
        product.name,
        product.brand,
        product.price.to_string()
    ))
}

/// List products matching `query`.
pub async fn list(ctx: &Context, query: ListingQuery) -> Result<(), CliError> {
    let patch = query.into_patch()?;
    services::fetch_products(ctx.state.store(), ctx.state.catalog()).await?;

    let mut store = ctx.state.store().write().await;
    if !patch.is_empty() {
        let _ = store.dispatch(ProductsAction::SetFilters(patch));
    }
    let products = &store.products().filtered;

    if ctx.out.is_json() {
        return ctx.out.json(products);
    }
    for product in products {
        write_product_row(&ctx.out, product)?;
    }
    ctx.out.line(format_args!("{} product(s)", products.len()))
}

/// Show one product with its related products.
pub async fn show(ctx: &Context, id: ProductId) -> Result<(), CliError> {
    // Related products come from the loaded listing
    services::fetch_products(ctx.state.store(), ctx.state.catalog()).await?;
    let product = services::fetch_product_by_id(ctx.state.store(), ctx.state.catalog(), id).await?;

    let store = ctx.state.store().read().await;
    let related = store.products().related(&product);

    if ctx.out.is_json() {
        return ctx.out.json(&serde_json::json!({
            "product": product,
            "related": related,
        }));
    }

    ctx.out.line(format_args!("{} ({})", product.name, product.brand))?;
    ctx.out.line(format_args!("Price:    {}", product.price))?;
    ctx.out.line(format_args!(
        "Category: {} / {}",
        product.category.department.as_str(),
        product.category.kind.as_str()
    ))?;
    if !product.description.is_empty() {
        ctx.out.line(format_args!("\n{}", product.description))?;
    }
    if !related.is_empty() {
        ctx.out.line("\nRelated:")?;
        for product in related {
            write_product_row(&ctx.out, product)?;
        }
    }
    Ok(())
}
