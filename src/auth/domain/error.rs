//! Error types for auth domain validation.

use thiserror::Error;

/// Errors returned while constructing auth domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthDomainError {
    /// The user identifier is empty or whitespace only.
    #[error("user id must not be empty")]
    EmptyUserId,

    /// The session lifetime is zero or negative.
    #[error("session lifetime must be positive, got {0} seconds")]
    NonPositiveSessionTtl(i64),

    /// The session lifetime exceeds [`MAX_SESSION_TTL_SECS`].
    ///
    /// [`MAX_SESSION_TTL_SECS`]: super::MAX_SESSION_TTL_SECS
    #[error("session lifetime of {0} seconds exceeds the 365 day limit")]
    SessionTtlTooLong(i64),

    /// The expiry instant falls outside the representable time range.
    #[error("session expiry is out of range")]
    ExpiryOutOfRange,

    /// The `state` correlation value is empty.
    #[error("authorization state must not be empty")]
    EmptyState,

    /// The PKCE code verifier does not follow RFC 7636.
    #[error("code verifier must be 43-128 characters from [A-Za-z0-9-._~]")]
    InvalidCodeVerifier,

    /// The authorization endpoint is not an absolute URL.
    #[error("invalid authorization endpoint '{url}': {reason}")]
    InvalidAuthorizeUrl {
        /// The rejected endpoint.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },
}
