//! In-memory email sender that records every accepted message.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::debug;

use crate::email::{
    domain::{EmailMessage, SentEmail},
    ports::{EmailError, EmailResult, EmailSender, sender::ensure_recipients},
};
use crate::error::poisoned;

/// Email sender that keeps sent messages in memory for inspection.
///
/// A simulated outage can be switched on with
/// [`InMemoryEmailSender::set_unavailable`]; while it is active every send
/// fails and nothing is recorded.
#[derive(Debug, Clone)]
pub struct InMemoryEmailSender<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<OutboxState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct OutboxState {
    sent: Vec<SentEmail>,
    outage: Option<String>,
}

impl InMemoryEmailSender<DefaultClock> {
    /// Creates an empty sender using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryEmailSender<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryEmailSender<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty sender using the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(OutboxState::default())),
            clock,
        }
    }

    /// Returns every email sent so far, oldest first.
    ///
    /// Returns an empty vector if the internal lock is poisoned.
    #[must_use]
    pub fn sent(&self) -> Vec<SentEmail> {
        self.state
            .read()
            .map(|guard| guard.sent.clone())
            .unwrap_or_default()
    }

    /// Returns the most recently sent email.
    #[must_use]
    pub fn last_sent(&self) -> Option<SentEmail> {
        self.state
            .read()
            .ok()
            .and_then(|guard| guard.sent.last().cloned())
    }

    /// Forgets every recorded email.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.state.write() {
            guard.sent.clear();
        }
    }

    /// Simulates a transport outage until called again with `None`.
    pub fn set_unavailable(&self, reason: Option<String>) {
        if let Ok(mut guard) = self.state.write() {
            guard.outage = reason;
        }
    }
}

#[async_trait]
impl<C> EmailSender for InMemoryEmailSender<C>
where
    C: Clock + Send + Sync,
{
    async fn send(&self, message: &EmailMessage) -> EmailResult<SentEmail> {
        ensure_recipients(message)?;
        let mut guard = self
            .state
            .write()
            .map_err(|err| EmailError::transport(poisoned(&err)))?;
        if let Some(reason) = &guard.outage {
            return Err(EmailError::transport(std::io::Error::other(reason.clone())));
        }

        let sent = SentEmail::accept(message.clone(), &*self.clock);
        guard.sent.push(sent.clone());
        debug!(email_id = %sent.id(), recipients = message.to().len(), "email recorded");
        Ok(sent)
    }
}
