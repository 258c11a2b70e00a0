//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email or password missing.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Name, email, or password missing at registration.
    #[error("Invalid user data")]
    InvalidUserData,

    /// The provider could not be reached.
    #[error("auth provider unavailable: {0}")]
    Unavailable(String),
}
