//! Event bus that forwards envelopes to an external transport.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::debug;

use crate::events::{
    domain::{DomainEvent, EventEnvelope, EventType},
    ports::{EventBus, EventBusError, EventBusResult, EventHandler, EventSink},
};

/// Bus for externally managed delivery.
///
/// Routing to consumers is configured outside the process, so runtime
/// subscriptions are rejected with [`EventBusError::Unsupported`].
#[derive(Debug, Clone)]
pub struct ForwardingEventBus<S, C = DefaultClock>
where
    S: EventSink,
    C: Clock + Send + Sync,
{
    sink: Arc<S>,
    source_prefix: Option<String>,
    clock: Arc<C>,
}

impl<S> ForwardingEventBus<S, DefaultClock>
where
    S: EventSink,
{
    /// Creates a bus forwarding to `sink`.
    #[must_use]
    pub fn new(sink: Arc<S>) -> Self {
        Self::with_clock(sink, None, Arc::new(DefaultClock))
    }
}

impl<S, C> ForwardingEventBus<S, C>
where
    S: EventSink,
    C: Clock + Send + Sync,
{
    /// Creates a bus forwarding to `sink`, prefixing envelope sources with
    /// `source_prefix` and stamping them with `clock`.
    #[must_use]
    pub const fn with_clock(sink: Arc<S>, source_prefix: Option<String>, clock: Arc<C>) -> Self {
        Self {
            sink,
            source_prefix,
            clock,
        }
    }

    /// Returns the underlying sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[async_trait]
impl<S, C> EventBus for ForwardingEventBus<S, C>
where
    S: EventSink,
    C: Clock + Send + Sync,
{
    async fn publish(&self, event: &DomainEvent) -> EventBusResult<()> {
        let envelope =
            EventEnvelope::wrap(event.clone(), self.source_prefix.as_deref(), &*self.clock);
        self.sink.put(&envelope).await?;
        debug!(
            event_id = %envelope.id,
            event_type = %envelope.event_type,
            source = %envelope.source,
            "event forwarded"
        );
        Ok(())
    }

    async fn subscribe(
        &self,
        _event_type: EventType,
        _handler: Arc<dyn EventHandler>,
    ) -> EventBusResult<()> {
        Err(EventBusError::Unsupported {
            operation: "subscribe",
        })
    }

    fn supports_subscribe(&self) -> bool {
        false
    }
}
