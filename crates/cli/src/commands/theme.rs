//! Theme preference commands.

use wardrobe_storefront::store::UiAction;

use super::{CliError, Context};

const fn theme_name(dark_mode: bool) -> &'static str {
    if dark_mode { "dark" } else { "light" }
}

pub async fn toggle(ctx: &Context) -> Result<(), CliError> {
    let mut store = ctx.state.store().write().await;
    let _ = store.dispatch(UiAction::ToggleDarkMode);
    ctx.out
        .line(format_args!("Theme: {}", theme_name(store.ui().dark_mode)))
}

pub async fn show(ctx: &Context) -> Result<(), CliError> {
    let store = ctx.state.store().read().await;
    ctx.out
        .line(format_args!("Theme: {}", theme_name(store.ui().dark_mode)))
}
