//! Domain event catalogue.

mod envelope;
mod event;
mod event_type;

pub use envelope::{EventEnvelope, EventId};
pub use event::{DomainEvent, ProjectCreated, ProjectPublished, UserCreated, UserUpdated};
pub use event_type::{EventType, ParseEventTypeError};
