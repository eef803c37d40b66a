//! Email sender port.

use crate::email::domain::{EmailMessage, SentEmail, TemplateError};
use crate::error::ErrorKind;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for email operations.
pub type EmailResult<T> = Result<T, EmailError>;

/// Email delivery contract.
///
/// Delivery is all-or-nothing: either every recipient is accepted by the
/// transport or the whole call fails. Every optional field of the input is
/// echoed unchanged on the returned [`SentEmail`].
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends `message` and returns it stamped with an identifier and send
    /// instant.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError::NoRecipients`] when the recipient list is empty
    /// or [`EmailError::Transport`] when the backend rejects the message.
    async fn send(&self, message: &EmailMessage) -> EmailResult<SentEmail>;
}

/// Errors returned by email senders.
#[derive(Debug, Clone, Error)]
pub enum EmailError {
    /// The message names no recipient.
    #[error("email must have at least one recipient")]
    NoRecipients,

    /// A template could not be rendered into a message.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The transport failed; nothing was sent.
    #[error("email transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl EmailError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoRecipients | Self::Template(_) => ErrorKind::Validation,
            Self::Transport(_) => ErrorKind::BackendUnavailable,
        }
    }
}

/// Rejects messages that cannot be delivered to anyone.
///
/// # Errors
///
/// Returns [`EmailError::NoRecipients`] for an empty recipient list.
pub fn ensure_recipients(message: &EmailMessage) -> EmailResult<()> {
    if message.to().is_empty() {
        return Err(EmailError::NoRecipients);
    }
    Ok(())
}
