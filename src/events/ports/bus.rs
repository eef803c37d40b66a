//! Event bus port.

use super::{EventHandler, HandlerError, SinkError};
use crate::error::ErrorKind;
use crate::events::domain::{DomainEvent, EventType};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event bus operations.
pub type EventBusResult<T> = Result<T, EventBusError>;

/// Publish/subscribe contract shared by every backend.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - A handler only sees events whose type equals its subscription type
/// - `publish` does not return before every matching handler completed
/// - Backends without in-process delivery report `false` from
///   [`EventBus::supports_subscribe`] and reject `subscribe` with
///   [`EventBusError::Unsupported`]
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Delivers `event` to its subscribers or transport.
    ///
    /// # Errors
    ///
    /// Returns [`EventBusError::HandlerFailed`] when any handler failed and
    /// [`EventBusError::Sink`] when the transport failed.
    async fn publish(&self, event: &DomainEvent) -> EventBusResult<()>;

    /// Registers `handler` for events of `event_type`.
    ///
    /// # Errors
    ///
    /// Returns [`EventBusError::Unsupported`] on backends without runtime
    /// subscriptions.
    async fn subscribe(
        &self,
        event_type: EventType,
        handler: Arc<dyn EventHandler>,
    ) -> EventBusResult<()>;

    /// Reports whether [`EventBus::subscribe`] is available.
    fn supports_subscribe(&self) -> bool;
}

/// One handler failure collected during fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    /// Position of the handler in registration order.
    pub index: usize,
    /// The reported error.
    pub error: HandlerError,
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler #{}: {}", self.index, self.error)
    }
}

fn join_failures(failures: &[HandlerFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors returned by event bus implementations.
#[derive(Debug, Clone, Error)]
pub enum EventBusError {
    /// The backend does not offer the operation.
    #[error("operation not supported by this event bus: {operation}")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// At least one subscribed handler failed; all handlers still ran.
    #[error("{} handler(s) failed for {event_type}: {}", failures.len(), join_failures(failures))]
    HandlerFailed {
        /// Type of the published event.
        event_type: EventType,
        /// Every failure, in registration order.
        failures: Vec<HandlerFailure>,
    },

    /// The forwarding transport failed.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// The backend failed.
    #[error("event bus backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl EventBusError {
    /// Wraps a backend failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::HandlerFailed { .. } => ErrorKind::HandlerFailed,
            Self::Sink(_) | Self::Backend(_) => ErrorKind::BackendUnavailable,
        }
    }
}
