//! Sign-in, registration and sign-out.

use wardrobe_core::{LoginRequest, RegisterRequest, UserSession};
use wardrobe_storefront::services;

use super::{CliError, Context};

fn write_user(ctx: &Context, user: &UserSession) -> Result<(), CliError> {
    if ctx.out.is_json() {
        return ctx.out.json(&serde_json::json!({
            "id": user.id,
            "name": user.name,
            "email": user.email,
        }));
    }
    ctx.out
        .line(format_args!("Signed in as {} <{}>", user.name, user.email))
}

pub async fn login(ctx: &Context, email: String, password: String) -> Result<(), CliError> {
    let request = LoginRequest { email, password };
    let user = services::login(ctx.state.store(), ctx.state.auth(), request).await?;
    tracing::info!(user_id = %user.id, "Signed in");
    write_user(ctx, &user)
}

pub async fn register(
    ctx: &Context,
    name: String,
    email: String,
    password: String,
) -> Result<(), CliError> {
    let request = RegisterRequest {
        name,
        email,
        password,
    };
    let user = services::register(ctx.state.store(), ctx.state.auth(), request).await?;
    tracing::info!(user_id = %user.id, "Registered");
    write_user(ctx, &user)
}

pub async fn logout(ctx: &Context) -> Result<(), CliError> {
    let was_signed_in = ctx.state.store().read().await.auth().is_authenticated();
    services::logout(ctx.state.store()).await;
    if was_signed_in {
        ctx.out.line("Signed out.")
    } else {
        ctx.out.line("Not signed in.")
    }
}
