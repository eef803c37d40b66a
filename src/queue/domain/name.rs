//! Validated queue name.

use super::QueueDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_QUEUE_NAME_LENGTH: usize = 80;

/// Name of a queue. Names partition message storage completely.
///
/// # Examples
///
/// ```
/// use switchyard::queue::domain::QueueName;
///
/// let name = QueueName::new(" jobs ").expect("valid queue name");
/// assert_eq!(name.as_str(), "jobs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QueueName(String);

impl QueueName {
    /// Validates and constructs a queue name.
    ///
    /// Surrounding whitespace is trimmed. Case is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`QueueDomainError`] when the name is empty, too long, or
    /// contains characters outside `[A-Za-z0-9_-]`.
    pub fn new(value: impl AsRef<str>) -> Result<Self, QueueDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(QueueDomainError::EmptyQueueName);
        }
        if trimmed.chars().count() > MAX_QUEUE_NAME_LENGTH {
            return Err(QueueDomainError::QueueNameTooLong(trimmed.to_owned()));
        }
        let valid = trimmed
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
        if !valid {
            return Err(QueueDomainError::InvalidQueueName(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for QueueName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for QueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for QueueName {
    type Error = QueueDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for QueueName {
    type Error = QueueDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QueueName> for String {
    fn from(value: QueueName) -> Self {
        value.0
    }
}
