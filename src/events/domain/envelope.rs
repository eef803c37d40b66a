//! Transport envelope for events leaving the process.

use super::{DomainEvent, EventType};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier assigned to an event when it is forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random event identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An event plus the routing metadata an external bus needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique identifier of this publication.
    pub id: EventId,
    /// Producer namespace, optionally prefixed per deployment.
    pub source: String,
    /// Discriminant of the carried event.
    pub event_type: EventType,
    /// When the event was published.
    pub occurred_at: DateTime<Utc>,
    /// The event itself.
    pub event: DomainEvent,
}

impl EventEnvelope {
    /// Wraps `event`, prefixing its source with `source_prefix` when given.
    #[must_use]
    pub fn wrap(event: DomainEvent, source_prefix: Option<&str>, clock: &impl Clock) -> Self {
        let source = source_prefix.map_or_else(
            || event.source().to_owned(),
            |prefix| format!("{prefix}.{}", event.source()),
        );
        Self {
            id: EventId::new(),
            source,
            event_type: event.event_type(),
            occurred_at: clock.utc(),
            event,
        }
    }
}
