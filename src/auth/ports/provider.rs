//! Authentication provider port.

use crate::auth::domain::{AuthDomainError, Session, SessionId, UserId};
use crate::error::ErrorKind;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Session issuance and validation contract.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - Session identifiers never collide
/// - `expires_at` is strictly after the creation instant
/// - Once invalidated, a session never validates again
/// - Unknown, expired and invalidated sessions are indistinguishable to
///   callers of `validate_session`
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Starts a session for `user_id`. The user is not looked up.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Backend`] when the session store fails.
    async fn create_session(&self, user_id: &UserId) -> AuthResult<Session>;

    /// Returns the session if it exists and has not expired.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Backend`] when the session store fails.
    async fn validate_session(&self, id: &SessionId) -> AuthResult<Option<Session>>;

    /// Ends the session. Unknown identifiers are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Backend`] when the session store fails.
    async fn invalidate_session(&self, id: &SessionId) -> AuthResult<()>;

    /// Builds the redirect that starts an external sign-in, embedding
    /// `state` verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Domain`] for an empty state or malformed
    /// verifier.
    async fn authorization_url(&self, state: &str, code_verifier: &str) -> AuthResult<Url>;
}

/// Errors returned by auth providers.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Caller input failed domain validation.
    #[error(transparent)]
    Domain(#[from] AuthDomainError),

    /// The session store failed.
    #[error("auth backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuthError {
    /// Wraps a backend failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Backend(_) => ErrorKind::BackendUnavailable,
        }
    }
}
