//! Session record and lifecycle state.

use super::{AuthDomainError, SessionId, UserId, UserSnapshot};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Session lifetime, in seconds, when none is configured (30 days).
pub const DEFAULT_SESSION_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Longest accepted session lifetime, in seconds (365 days).
pub const MAX_SESSION_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Converts a lifetime in whole seconds into a session TTL.
///
/// # Errors
///
/// Returns [`AuthDomainError::NonPositiveSessionTtl`] for zero or negative
/// values and [`AuthDomainError::SessionTtlTooLong`] above
/// [`MAX_SESSION_TTL_SECS`].
pub fn session_ttl(seconds: i64) -> Result<Duration, AuthDomainError> {
    if seconds <= 0 {
        return Err(AuthDomainError::NonPositiveSessionTtl(seconds));
    }
    if seconds > MAX_SESSION_TTL_SECS {
        return Err(AuthDomainError::SessionTtlTooLong(seconds));
    }
    Duration::try_seconds(seconds).ok_or(AuthDomainError::SessionTtlTooLong(seconds))
}

/// Checks that `ttl` lies within `(0, MAX_SESSION_TTL_SECS]`.
pub(crate) fn check_session_ttl(ttl: Duration) -> Result<(), AuthDomainError> {
    if ttl <= Duration::zero() {
        return Err(AuthDomainError::NonPositiveSessionTtl(ttl.num_seconds()));
    }
    if ttl.num_seconds() > MAX_SESSION_TTL_SECS {
        return Err(AuthDomainError::SessionTtlTooLong(ttl.num_seconds()));
    }
    Ok(())
}

/// Lifecycle state of a session at a given instant.
///
/// Invalidated sessions are not represented: they no longer exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// The session is usable.
    Active,
    /// The expiry instant has passed.
    Expired,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    user_id: UserId,
    user: UserSnapshot,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Starts a session for `user` lasting `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns [`AuthDomainError::NonPositiveSessionTtl`] unless `ttl` is
    /// strictly positive, so `expires_at` is always after `created_at`.
    /// Returns [`AuthDomainError::SessionTtlTooLong`] above
    /// [`MAX_SESSION_TTL_SECS`] and [`AuthDomainError::ExpiryOutOfRange`]
    /// when the expiry cannot be represented.
    pub fn start(
        user: UserSnapshot,
        ttl: Duration,
        clock: &impl Clock,
    ) -> Result<Self, AuthDomainError> {
        check_session_ttl(ttl)?;
        let created_at = clock.utc();
        let expires_at = created_at
            .checked_add_signed(ttl)
            .ok_or(AuthDomainError::ExpiryOutOfRange)?;
        Ok(Self {
            id: SessionId::generate(),
            user_id: user.id.clone(),
            user,
            created_at,
            expires_at,
        })
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the owning user identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the user snapshot taken at creation.
    #[must_use]
    pub const fn user(&self) -> &UserSnapshot {
        &self.user
    }

    /// Returns the creation instant.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the expiry instant.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns the state at `now`. A session is expired from its expiry
    /// instant onwards.
    #[must_use]
    pub fn state_at(&self, now: DateTime<Utc>) -> SessionState {
        if now < self.expires_at {
            SessionState::Active
        } else {
            SessionState::Expired
        }
    }
}
