//! UI state route handlers.
//!
//! These back the header controls: theme toggle, cart drawer, auth modal,
//! mobile menu and the notification banner.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use crate::state::AppState;
use crate::store::{AuthModalMode, UiAction, UiState};

/// Auth modal request body.
#[derive(Debug, Default, Deserialize)]
pub struct AuthModalRequest {
    #[serde(default)]
    pub mode: AuthModalMode,
}

async fn apply(state: &AppState, action: UiAction) -> Json<UiState> {
    let mut store = state.store().write().await;
    let _ = store.dispatch(action);
    Json(store.ui().clone())
}

/// Current UI state.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<UiState> {
    Json(state.store().read().await.ui().clone())
}

#[instrument(skip(state))]
pub async fn toggle_dark_mode(State(state): State<AppState>) -> Json<UiState> {
    apply(&state, UiAction::ToggleDarkMode).await
}

/// Open the auth modal, or switch its form if already open.
#[instrument(skip(state))]
pub async fn open_auth_modal(
    State(state): State<AppState>,
    body: Option<Json<AuthModalRequest>>,
) -> Json<UiState> {
    let mode = body.map(|Json(body)| body.mode).unwrap_or_default();
    let mut store = state.store().write().await;
    let action = if store.ui().auth_modal.is_some() {
        UiAction::SetAuthModalMode(mode)
    } else {
        UiAction::OpenAuthModal(mode)
    };
    let _ = store.dispatch(action);
    Json(store.ui().clone())
}

#[instrument(skip(state))]
pub async fn close_auth_modal(State(state): State<AppState>) -> Json<UiState> {
    apply(&state, UiAction::CloseAuthModal).await
}

#[instrument(skip(state))]
pub async fn toggle_cart(State(state): State<AppState>) -> Json<UiState> {
    apply(&state, UiAction::ToggleCart).await
}

#[instrument(skip(state))]
pub async fn toggle_mobile_menu(State(state): State<AppState>) -> Json<UiState> {
    apply(&state, UiAction::ToggleMobileMenu).await
}

/// Dismiss the notification banner.
#[instrument(skip(state))]
pub async fn clear_notification(State(state): State<AppState>) -> Json<UiState> {
    apply(&state, UiAction::ClearNotification).await
}
