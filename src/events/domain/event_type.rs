//! Event discriminants used as subscription keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The type tag of a [`super::DomainEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EventType {
    /// A user account was created.
    UserCreated,
    /// A user account changed.
    UserUpdated,
    /// A project was created.
    ProjectCreated,
    /// A project was published.
    ProjectPublished,
}

/// Error returned while parsing an unknown event type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown event type: {0}")]
pub struct ParseEventTypeError(pub String);

impl EventType {
    /// Every event type, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::UserCreated,
        Self::UserUpdated,
        Self::ProjectCreated,
        Self::ProjectPublished,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserCreated => "user.created",
            Self::UserUpdated => "user.updated",
            Self::ProjectCreated => "project.created",
            Self::ProjectPublished => "project.published",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EventType {
    type Error = ParseEventTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| ParseEventTypeError(value.to_owned()))
    }
}

impl TryFrom<String> for EventType {
    type Error = ParseEventTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        value.as_str().to_owned()
    }
}
