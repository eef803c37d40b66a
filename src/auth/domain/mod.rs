//! Domain model for sessions and single-sign-on requests.

mod error;
mod ids;
mod oauth;
mod session;
mod user;

pub use error::AuthDomainError;
pub use ids::{SessionId, UserId};
pub use oauth::{OAuthClientConfig, code_challenge, validate_code_verifier};
pub use session::{
    DEFAULT_SESSION_TTL_SECS, MAX_SESSION_TTL_SECS, Session, SessionState, session_ttl,
};
pub(crate) use session::check_session_ttl;
pub use user::UserSnapshot;
