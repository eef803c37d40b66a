//! Port contracts for authentication.

pub mod provider;

pub use provider::{AuthError, AuthProvider, AuthResult};
