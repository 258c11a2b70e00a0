//! Auth slice.

use serde::Serialize;
use wardrobe_core::UserSession;

/// Auth slice actions.
#[derive(Debug, Clone)]
pub enum AuthAction {
    /// A login or registration request is in flight.
    AuthStarted,
    AuthSucceeded(UserSession),
    AuthFailed(String),
    Logout,
}

/// Auth slice state.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<UserSession>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub(crate) fn reduce(&mut self, action: AuthAction) {
        match action {
            AuthAction::AuthStarted => {
                self.loading = true;
                self.error = None;
            }
            AuthAction::AuthSucceeded(user) => {
                self.loading = false;
                self.user = Some(user);
            }
            AuthAction::AuthFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            AuthAction::Logout => {
                self.user = None;
                self.error = None;
            }
        }
    }
}
