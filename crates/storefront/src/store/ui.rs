//! UI slice: theme, drawers, modal, and the notification banner.

use serde::{Deserialize, Serialize};

/// Which form the auth modal shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthModalMode {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Success,
    Error,
    Info,
}

/// Banner shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub status: NotificationStatus,
    pub title: String,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: NotificationStatus::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: NotificationStatus::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// UI slice actions.
#[derive(Debug, Clone)]
pub enum UiAction {
    ToggleDarkMode,
    SetDarkMode(bool),
    ToggleCart,
    CloseCart,
    OpenAuthModal(AuthModalMode),
    CloseAuthModal,
    /// Switch between login and register while the modal is open.
    SetAuthModalMode(AuthModalMode),
    ShowNotification(Notification),
    ClearNotification,
    ToggleMobileMenu,
    CloseMobileMenu,
}

impl UiAction {
    /// Whether the action changes the persisted theme preference.
    #[must_use]
    pub const fn touches_theme(&self) -> bool {
        matches!(self, Self::ToggleDarkMode | Self::SetDarkMode(_))
    }
}

/// UI slice state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub dark_mode: bool,
    pub show_cart: bool,
    /// Open auth modal and its mode; `None` when closed.
    pub auth_modal: Option<AuthModalMode>,
    pub notification: Option<Notification>,
    pub mobile_menu_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            dark_mode: true,
            show_cart: false,
            auth_modal: None,
            notification: None,
            mobile_menu_open: false,
        }
    }
}

impl UiState {
    pub(crate) fn reduce(&mut self, action: UiAction) {
        match action {
            UiAction::ToggleDarkMode => self.dark_mode = !self.dark_mode,
            UiAction::SetDarkMode(on) => self.dark_mode = on,
            UiAction::ToggleCart => self.show_cart = !self.show_cart,
            UiAction::CloseCart => self.show_cart = false,
            UiAction::OpenAuthModal(mode) => self.auth_modal = Some(mode),
            UiAction::CloseAuthModal => self.auth_modal = None,
            UiAction::SetAuthModalMode(mode) => {
                if let Some(current) = self.auth_modal.as_mut() {
                    *current = mode;
                }
            }
            UiAction::ShowNotification(notification) => self.notification = Some(notification),
            UiAction::ClearNotification => self.notification = None,
            UiAction::ToggleMobileMenu => self.mobile_menu_open = !self.mobile_menu_open,
            UiAction::CloseMobileMenu => self.mobile_menu_open = false,
        }
    }
}
