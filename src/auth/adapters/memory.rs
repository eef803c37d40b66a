//! In-memory mock implementation of the [`AuthProvider`] port.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Duration;
use mockable::{Clock, DefaultClock};
use tracing::debug;
use url::Url;

use crate::auth::{
    domain::{
        AuthDomainError, DEFAULT_SESSION_TTL_SECS, OAuthClientConfig, Session, SessionId,
        SessionState, UserId, UserSnapshot, check_session_ttl,
    },
    ports::{AuthError, AuthProvider, AuthResult},
};
use crate::error::poisoned;

/// Authorization endpoint used when no client is configured.
pub const MOCK_AUTHORIZE_URL: &str = "http://localhost/mock-auth/authorize";

/// Session provider backed by process memory.
///
/// Users registered with [`MockAuthProvider::register_user`] contribute
/// their email and display name to new sessions; any other user id gets a
/// bare snapshot. Expired sessions are evicted when looked up.
#[derive(Debug, Clone)]
pub struct MockAuthProvider<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<AuthState>>,
    ttl: Duration,
    oauth: OAuthClientConfig,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct AuthState {
    sessions: HashMap<SessionId, Session>,
    users: HashMap<UserId, UserSnapshot>,
}

/// Client configuration pointing at the local mock endpoint.
#[must_use]
pub fn mock_oauth_client() -> OAuthClientConfig {
    OAuthClientConfig {
        authorize_url: MOCK_AUTHORIZE_URL.to_owned(),
        client_id: "mock-client".to_owned(),
        redirect_uri: "http://localhost/auth/callback".to_owned(),
        scopes: vec!["openid".to_owned(), "email".to_owned()],
    }
}

impl MockAuthProvider<DefaultClock> {
    /// Creates a provider with the default session lifetime and mock client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(AuthState::default())),
            ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECS),
            oauth: mock_oauth_client(),
            clock: Arc::new(DefaultClock),
        }
    }
}

impl Default for MockAuthProvider<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> MockAuthProvider<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a provider with an explicit lifetime, client and clock.
    ///
    /// # Errors
    ///
    /// Returns [`AuthDomainError::NonPositiveSessionTtl`] unless `ttl` is
    /// strictly positive, or [`AuthDomainError::SessionTtlTooLong`] when it
    /// exceeds [`MAX_SESSION_TTL_SECS`](crate::auth::domain::MAX_SESSION_TTL_SECS).
    pub fn with_settings(
        ttl: Duration,
        oauth: OAuthClientConfig,
        clock: Arc<C>,
    ) -> Result<Self, AuthDomainError> {
        check_session_ttl(ttl)?;
        Ok(Self {
            state: Arc::new(RwLock::new(AuthState::default())),
            ttl,
            oauth,
            clock,
        })
    }

    /// Returns the session lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Makes `user` known so its details are copied onto new sessions.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Backend`] when the internal lock is poisoned.
    pub fn register_user(&self, user: UserSnapshot) -> AuthResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| AuthError::backend(poisoned(&err)))?;
        state.users.insert(user.id.clone(), user);
        Ok(())
    }

    /// Returns the user's sessions that are still active.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Backend`] when the internal lock is poisoned.
    pub fn active_sessions(&self, user_id: &UserId) -> AuthResult<Vec<Session>> {
        let now = self.clock.utc();
        let state = self
            .state
            .read()
            .map_err(|err| AuthError::backend(poisoned(&err)))?;
        let mut sessions: Vec<Session> = state
            .sessions
            .values()
            .filter(|s| s.user_id() == user_id && s.state_at(now) == SessionState::Active)
            .cloned()
            .collect();
        sessions.sort_by_key(Session::created_at);
        Ok(sessions)
    }

    /// Ends every session of `user_id` and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Backend`] when the internal lock is poisoned.
    pub fn invalidate_user_sessions(&self, user_id: &UserId) -> AuthResult<usize> {
        let mut state = self
            .state
            .write()
            .map_err(|err| AuthError::backend(poisoned(&err)))?;
        let before = state.sessions.len();
        state.sessions.retain(|_, session| session.user_id() != user_id);
        let removed = before.saturating_sub(state.sessions.len());
        debug!(user_id = %user_id, removed, "user sessions invalidated");
        Ok(removed)
    }
}

#[async_trait]
impl<C> AuthProvider for MockAuthProvider<C>
where
    C: Clock + Send + Sync,
{
    async fn create_session(&self, user_id: &UserId) -> AuthResult<Session> {
        let mut state = self
            .state
            .write()
            .map_err(|err| AuthError::backend(poisoned(&err)))?;
        let snapshot = state
            .users
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| UserSnapshot::bare(user_id.clone()));
        let session = Session::start(snapshot, self.ttl, &*self.clock)?;
        state.sessions.insert(session.id().clone(), session.clone());
        debug!(user_id = %user_id, expires_at = %session.expires_at(), "session created");
        Ok(session)
    }

    async fn validate_session(&self, id: &SessionId) -> AuthResult<Option<Session>> {
        let now = self.clock.utc();
        let mut state = self
            .state
            .write()
            .map_err(|err| AuthError::backend(poisoned(&err)))?;
        let Some(session) = state.sessions.get(id) else {
            return Ok(None);
        };
        if session.state_at(now) == SessionState::Expired {
            state.sessions.remove(id);
            debug!("expired session evicted");
            return Ok(None);
        }
        Ok(Some(session.clone()))
    }

    async fn invalidate_session(&self, id: &SessionId) -> AuthResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| AuthError::backend(poisoned(&err)))?;
        if state.sessions.remove(id).is_some() {
            debug!("session invalidated");
        }
        Ok(())
    }

    async fn authorization_url(&self, state: &str, code_verifier: &str) -> AuthResult<Url> {
        Ok(self.oauth.authorization_url(state, code_verifier)?)
    }
}
