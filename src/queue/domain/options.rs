//! Receive options.

use super::QueueDomainError;

/// Batch size used when the caller does not ask for a specific one.
pub const DEFAULT_MAX_MESSAGES: usize = 10;

/// Options for a single `receive` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveOptions {
    max_messages: usize,
}

impl ReceiveOptions {
    /// Creates options returning at most `max_messages` messages.
    ///
    /// # Errors
    ///
    /// Returns [`QueueDomainError::ZeroMaxMessages`] when `max_messages` is 0.
    pub const fn with_max_messages(max_messages: usize) -> Result<Self, QueueDomainError> {
        if max_messages == 0 {
            return Err(QueueDomainError::ZeroMaxMessages);
        }
        Ok(Self { max_messages })
    }

    /// Returns the batch size.
    #[must_use]
    pub const fn max_messages(self) -> usize {
        self.max_messages
    }
}

impl Default for ReceiveOptions {
    fn default() -> Self {
        Self {
            max_messages: DEFAULT_MAX_MESSAGES,
        }
    }
}
