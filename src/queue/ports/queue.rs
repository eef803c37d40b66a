//! Message queue port.

use crate::error::ErrorKind;
use crate::queue::domain::{MessageId, QueueDomainError, QueueMessage, QueueName, ReceiveOptions};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Queue contract shared by every backend.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - Operations on one queue name never observe or affect another
/// - Every `send` yields a fresh identifier, the current timestamp and zero
///   attempts
/// - `receive` returns previously sent messages that were not deleted;
///   ordering is backend-specific
/// - Transport failures are propagated, never swallowed
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Appends a message to the named queue and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Backend`] when the backend is unavailable.
    async fn send(&self, queue: &QueueName, body: Value) -> QueueResult<MessageId>;

    /// Returns up to `options.max_messages()` visible messages.
    ///
    /// An empty or unknown queue yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Backend`] when the backend is unavailable.
    async fn receive(
        &self,
        queue: &QueueName,
        options: ReceiveOptions,
    ) -> QueueResult<Vec<QueueMessage>>;

    /// Removes one message. Unknown identifiers are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Backend`] when the backend is unavailable.
    async fn delete(&self, queue: &QueueName, id: MessageId) -> QueueResult<()>;

    /// Removes every message in the named queue only.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Backend`] when the backend is unavailable.
    async fn purge(&self, queue: &QueueName) -> QueueResult<()>;
}

/// Typed convenience methods available on every [`MessageQueue`].
#[async_trait]
pub trait MessageQueueExt: MessageQueue {
    /// Serialises `body` to JSON and sends it.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::InvalidBody`] when `body` cannot be serialised,
    /// before any backend call is made.
    async fn send_json<T>(&self, queue: &QueueName, body: &T) -> QueueResult<MessageId>
    where
        T: Serialize + Sync + ?Sized,
    {
        let value = serde_json::to_value(body).map_err(QueueError::invalid_body)?;
        self.send(queue, value).await
    }
}

impl<Q: MessageQueue + ?Sized> MessageQueueExt for Q {}

/// Errors returned by queue implementations.
#[derive(Debug, Clone, Error)]
pub enum QueueError {
    /// Caller input failed domain validation.
    #[error(transparent)]
    Domain(#[from] QueueDomainError),

    /// The message body cannot be represented as JSON.
    #[error("invalid message body: {0}")]
    InvalidBody(Arc<serde_json::Error>),

    /// The backend failed.
    #[error("queue backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl QueueError {
    /// Wraps a serialisation failure.
    #[must_use]
    pub fn invalid_body(err: serde_json::Error) -> Self {
        Self::InvalidBody(Arc::new(err))
    }

    /// Wraps a backend failure.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::InvalidBody(_) => ErrorKind::Validation,
            Self::Backend(_) => ErrorKind::BackendUnavailable,
        }
    }
}
