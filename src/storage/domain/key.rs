//! Validated object key.

use super::StorageDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_KEY_BYTES: usize = 1024;

/// Hierarchical, `/`-separated object key.
///
/// Keys are relative paths: no leading `/`, no empty, `.` or `..` segments,
/// no backslashes or NUL bytes. This keeps them safe to map onto a
/// filesystem directory tree.
///
/// # Examples
///
/// ```
/// use switchyard::storage::domain::ObjectKey;
///
/// assert!(ObjectKey::new("avatars/42.png").is_ok());
/// assert!(ObjectKey::new("../etc/passwd").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Validates and constructs an object key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageDomainError`] when the key is empty, too long, or
    /// not a clean relative path.
    pub fn new(value: impl Into<String>) -> Result<Self, StorageDomainError> {
        let key = value.into();
        if key.is_empty() {
            return Err(StorageDomainError::EmptyKey);
        }
        if key.len() > MAX_KEY_BYTES {
            return Err(StorageDomainError::KeyTooLong);
        }
        let clean_segments = key
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
        if !clean_segments || key.contains(['\\', '\0']) {
            return Err(StorageDomainError::InvalidKey(key));
        }
        Ok(Self(key))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the `/`-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Returns `true` when the key starts with `prefix`.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ObjectKey {
    type Error = StorageDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ObjectKey {
    type Error = StorageDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ObjectKey> for String {
    fn from(value: ObjectKey) -> Self {
        value.0
    }
}
