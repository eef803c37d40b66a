//! Email sender that writes messages to the tracing log.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::info;

use crate::email::{
    domain::{EmailMessage, SentEmail},
    ports::{EmailResult, EmailSender, sender::ensure_recipients},
};

/// Development sender that logs each email instead of delivering it.
#[derive(Debug, Clone)]
pub struct LogEmailSender<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    default_from: String,
    clock: Arc<C>,
}

impl LogEmailSender<DefaultClock> {
    /// Creates a sender that reports `default_from` for messages without a
    /// sender override.
    #[must_use]
    pub fn new(default_from: impl Into<String>) -> Self {
        Self::with_clock(default_from, Arc::new(DefaultClock))
    }
}

impl<C> LogEmailSender<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a sender using the given clock.
    #[must_use]
    pub fn with_clock(default_from: impl Into<String>, clock: Arc<C>) -> Self {
        Self {
            default_from: default_from.into(),
            clock,
        }
    }

    /// Returns the sender address used when a message has none.
    #[must_use]
    pub fn default_from(&self) -> &str {
        &self.default_from
    }
}

#[async_trait]
impl<C> EmailSender for LogEmailSender<C>
where
    C: Clock + Send + Sync,
{
    async fn send(&self, message: &EmailMessage) -> EmailResult<SentEmail> {
        ensure_recipients(message)?;
        let sent = SentEmail::accept(message.clone(), &*self.clock);
        let recipients = message.to().iter().collect::<Vec<_>>().join(", ");
        info!(
            email_id = %sent.id(),
            from = message.from().unwrap_or(&self.default_from),
            to = %recipients,
            subject = message.subject(),
            attachments = message.attachments().len(),
            "email sent"
        );
        Ok(sent)
    }
}
