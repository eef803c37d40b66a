//! Error classification shared by every capability.
//!
//! Each capability port defines its own error enum so callers can match on
//! precise variants. [`ErrorKind`] groups those variants into the failure
//! classes application code usually branches on.

use std::fmt;

/// Boxed error used at seams that accept arbitrary failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Coarse failure class of a capability error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The referenced key, session or message does not exist where the
    /// operation requires it to.
    NotFound,
    /// Caller-supplied input violates the operation's preconditions.
    Validation,
    /// The backing store or transport failed.
    BackendUnavailable,
    /// The provider deliberately does not implement the operation.
    Unsupported,
    /// The capability worked but a subscribed handler reported failure.
    HandlerFailed,
}

impl ErrorKind {
    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::BackendUnavailable => "backend_unavailable",
            Self::Unsupported => "unsupported",
            Self::HandlerFailed => "handler_failed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts a poisoned lock into an I/O error suitable for wrapping.
pub(crate) fn poisoned<T>(err: &std::sync::PoisonError<T>) -> std::io::Error {
    std::io::Error::other(err.to_string())
}
