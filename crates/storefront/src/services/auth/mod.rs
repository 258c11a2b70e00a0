//! Authentication provider.
//!
//! The storefront has no account backend. [`MockAuthProvider`] accepts any
//! complete set of credentials after a fixed delay and issues a static
//! session. Swapping in a real provider only means implementing
//! [`AuthProvider`].

mod error;

pub use error::AuthError;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use tracing::instrument;
use wardrobe_core::{LoginRequest, RegisterRequest, UserId, UserSession};

/// Signs users in and registers new accounts.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchange credentials for a session.
    async fn login(&self, request: LoginRequest) -> Result<UserSession, AuthError>;

    /// Create an account and sign it in.
    async fn register(&self, request: RegisterRequest) -> Result<UserSession, AuthError>;
}

/// Id every mock session carries.
const MOCK_USER_ID: &str = "user1";

/// Name reported for mock logins (registration uses the submitted name).
const MOCK_USER_NAME: &str = "Demo User";

/// Token every mock session carries.
const MOCK_TOKEN: &str = "mock-jwt-token";

/// Auth provider that simulates a backend.
#[derive(Debug, Clone)]
pub struct MockAuthProvider {
    delay: Duration,
}

impl MockAuthProvider {
    /// Create a provider that answers after `delay`.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    fn session(name: String, email: String) -> UserSession {
        UserSession {
            id: UserId::new(MOCK_USER_ID),
            name,
            email,
            token: SecretString::from(MOCK_TOKEN),
        }
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn login(&self, request: LoginRequest) -> Result<UserSession, AuthError> {
        self.wait().await;

        if !request.is_complete() {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!("Mock login succeeded");
        Ok(Self::session(
            MOCK_USER_NAME.to_string(),
            request.email.trim().to_string(),
        ))
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register(&self, request: RegisterRequest) -> Result<UserSession, AuthError> {
        self.wait().await;

        if !request.is_complete() {
            return Err(AuthError::InvalidUserData);
        }

        tracing::info!("Mock registration succeeded");
        Ok(Self::session(
            request.name.trim().to_string(),
            request.email.trim().to_string(),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_issues_demo_session() {
        let provider = MockAuthProvider::new(Duration::ZERO);
        let session = provider
            .login(LoginRequest {
                email: "shopper@example.com".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        assert_eq!(session.id.as_str(), "user1");
        assert_eq!(session.name, "Demo User");
        assert_eq!(session.email, "shopper@example.com");
        assert_eq!(session.token(), "mock-jwt-token");
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let provider = MockAuthProvider::new(Duration::ZERO);
        let err = provider
            .login(LoginRequest {
                email: "shopper@example.com".into(),
                password: String::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_register_uses_submitted_name() {
        let provider = MockAuthProvider::new(Duration::ZERO);
        let session = provider
            .register(RegisterRequest {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        assert_eq!(session.name, "Asha");

        let err = provider.register(RegisterRequest::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid user data");
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_is_applied() {
        let provider = MockAuthProvider::new(Duration::from_millis(1000));
        let started = tokio::time::Instant::now();
        provider.register(RegisterRequest::default()).await.unwrap_err();
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}
