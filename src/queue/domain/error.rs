//! Error types for queue domain validation.

use thiserror::Error;

/// Errors returned while constructing queue domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueueDomainError {
    /// The queue name is empty after trimming.
    #[error("queue name must not be empty")]
    EmptyQueueName,

    /// The queue name contains characters outside `[A-Za-z0-9_-]`.
    #[error(
        "queue name '{0}' contains invalid characters (only alphanumeric, hyphens and underscores allowed)"
    )]
    InvalidQueueName(String),

    /// The queue name exceeds the 80-character limit.
    #[error("queue name exceeds 80 character limit: {0}")]
    QueueNameTooLong(String),

    /// A receive call asked for zero messages.
    #[error("max_messages must be at least 1")]
    ZeroMaxMessages,
}
