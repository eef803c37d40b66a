//! Queued message record.

use super::MessageId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message held by a queue.
///
/// Created by `send` with zero attempts; the attempt counter grows each
/// time the message is delivered again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueMessage {
    id: MessageId,
    body: Value,
    timestamp: DateTime<Utc>,
    attempts: u32,
}

impl QueueMessage {
    /// Creates a fresh message with a new identifier and zero attempts.
    #[must_use]
    pub fn new(body: Value, clock: &impl Clock) -> Self {
        Self {
            id: MessageId::new(),
            body,
            timestamp: clock.utc(),
            attempts: 0,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the message payload.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Returns the creation instant.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns how many times the message was delivered before.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Records one more delivery.
    #[expect(
        clippy::missing_const_for_fn,
        reason = "&mut self methods cannot be const in stable Rust"
    )]
    pub fn record_delivery(&mut self) {
        self.attempts = self.attempts.saturating_add(1);
    }
}
