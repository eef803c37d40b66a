//! Error types for storage domain validation.

use thiserror::Error;

/// Errors returned while constructing storage domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageDomainError {
    /// The object key is empty.
    #[error("object key must not be empty")]
    EmptyKey,

    /// The object key exceeds 1024 bytes.
    #[error("object key exceeds 1024 byte limit")]
    KeyTooLong,

    /// The object key has an absolute, empty, `.` or `..` segment, or
    /// contains a backslash or NUL.
    #[error("object key '{0}' is not a valid relative path")]
    InvalidKey(String),

    /// The signed URL base could not be parsed.
    #[error("invalid signed URL base '{base}': {reason}")]
    InvalidBaseUrl {
        /// The rejected base.
        base: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The signing key was empty.
    #[error("signing secret must not be empty")]
    EmptySigningSecret,

    /// The signed URL lifetime is not within one second to seven days.
    #[error("signed URL lifetime of {0} seconds is outside 1..=604800")]
    UrlTtlOutOfRange(i64),

    /// The expiry instant falls outside the representable time range.
    #[error("signed URL expiry is out of range")]
    ExpiryOutOfRange,
}
