//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::instrument;
use wardrobe_core::{LoginRequest, RegisterRequest, UserId, UserSession};

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::services;
use crate::state::AppState;

/// Public view of the signed-in user.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&UserSession> for UserView {
    fn from(user: &UserSession) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Sign-in response. The token is only ever returned here.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserView,
    pub token: String,
}

impl From<&UserSession> for SessionResponse {
    fn from(user: &UserSession) -> Self {
        Self {
            user: UserView::from(user),
            token: user.token().to_string(),
        }
    }
}

/// Sign in.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let user = services::login(state.store(), state.auth(), body).await?;
    set_sentry_user(&user.id, Some(&user.email));
    tracing::info!(user_id = %user.id, "User signed in");
    Ok(Json(SessionResponse::from(&user)))
}

/// Register a new account and sign in.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    let user = services::register(state.store(), state.auth(), body).await?;
    set_sentry_user(&user.id, Some(&user.email));
    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(SessionResponse::from(&user))))
}

/// Sign out.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    services::logout(state.store()).await;
    clear_sentry_user();
    StatusCode::NO_CONTENT
}

/// The signed-in user.
#[instrument(skip_all)]
pub async fn me(State(state): State<AppState>) -> Result<Json<UserView>> {
    let store = state.store().read().await;
    store
        .auth()
        .user
        .as_ref()
        .map(|user| Json(UserView::from(user)))
        .ok_or_else(|| AppError::Unauthorized("not signed in".to_string()))
}
