//! The closed set of domain events and their payloads.

use super::EventType;
use serde::{Deserialize, Serialize};

const USERS_SOURCE: &str = "app.users";
const PROJECTS_SOURCE: &str = "app.projects";

/// Payload of [`DomainEvent::UserCreated`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreated {
    /// The new user's identifier.
    pub user_id: String,
    /// The new user's email address.
    pub email: String,
}

/// Payload of [`DomainEvent::UserUpdated`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdated {
    /// The user's identifier.
    pub user_id: String,
    /// Names of the fields that changed.
    pub changed_fields: Vec<String>,
}

/// Payload of [`DomainEvent::ProjectCreated`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCreated {
    /// The project identifier.
    pub project_id: String,
    /// The owning user's identifier.
    pub owner_id: String,
    /// The project name.
    pub name: String,
}

/// Payload of [`DomainEvent::ProjectPublished`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPublished {
    /// The project identifier.
    pub project_id: String,
    /// Public URL of the published project.
    pub url: String,
}

/// Something that happened in the business domain.
///
/// Serialises with a `type` tag holding the [`EventType`] wire name and a
/// `data` field holding the payload.
///
/// # Examples
///
/// ```
/// use switchyard::events::domain::{DomainEvent, EventType, UserCreated};
///
/// let event = DomainEvent::UserCreated(UserCreated {
///     user_id: "u-1".to_owned(),
///     email: "ada@example.com".to_owned(),
/// });
/// assert_eq!(event.event_type(), EventType::UserCreated);
/// assert_eq!(event.source(), "app.users");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DomainEvent {
    /// A user account was created.
    #[serde(rename = "user.created")]
    UserCreated(UserCreated),
    /// A user account changed.
    #[serde(rename = "user.updated")]
    UserUpdated(UserUpdated),
    /// A project was created.
    #[serde(rename = "project.created")]
    ProjectCreated(ProjectCreated),
    /// A project was published.
    #[serde(rename = "project.published")]
    ProjectPublished(ProjectPublished),
}

impl DomainEvent {
    /// Returns the discriminant used for subscription matching.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::UserCreated(_) => EventType::UserCreated,
            Self::UserUpdated(_) => EventType::UserUpdated,
            Self::ProjectCreated(_) => EventType::ProjectCreated,
            Self::ProjectPublished(_) => EventType::ProjectPublished,
        }
    }

    /// Returns the namespace of the producing subsystem.
    #[must_use]
    pub const fn source(&self) -> &'static str {
        match self {
            Self::UserCreated(_) | Self::UserUpdated(_) => USERS_SOURCE,
            Self::ProjectCreated(_) | Self::ProjectPublished(_) => PROJECTS_SOURCE,
        }
    }
}
