//! In-process event bus.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::poisoned;
use crate::events::{
    domain::{DomainEvent, EventType},
    ports::{EventBus, EventBusError, EventBusResult, EventHandler, HandlerFailure},
};

type HandlerMap = HashMap<EventType, Vec<Arc<dyn EventHandler>>>;

/// Event bus that calls subscribed handlers directly.
///
/// Handlers for one event run one after another in registration order.
/// Every matching handler runs even when an earlier one fails.
#[derive(Clone, Default)]
pub struct InMemoryEventBus {
    handlers: Arc<RwLock<HandlerMap>>,
}

impl std::fmt::Debug for InMemoryEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryEventBus")
            .field("subscriptions", &self.subscription_count())
            .finish()
    }
}

impl InMemoryEventBus {
    /// Creates a bus with no subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many handlers are registered across all event types.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.handlers
            .read()
            .map_or(0, |guard| guard.values().map(Vec::len).sum())
    }

    /// Removes every subscription.
    ///
    /// # Errors
    ///
    /// Returns [`EventBusError::Backend`] when the handler table lock is
    /// poisoned.
    pub fn clear(&self) -> EventBusResult<()> {
        let mut guard = self
            .handlers
            .write()
            .map_err(|err| EventBusError::backend(poisoned(&err)))?;
        guard.clear();
        Ok(())
    }

    fn handlers_for(&self, event_type: EventType) -> EventBusResult<Vec<Arc<dyn EventHandler>>> {
        let guard = self
            .handlers
            .read()
            .map_err(|err| EventBusError::backend(poisoned(&err)))?;
        Ok(guard.get(&event_type).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: &DomainEvent) -> EventBusResult<()> {
        let event_type = event.event_type();
        let handlers = self.handlers_for(event_type)?;
        debug!(event_type = %event_type, handlers = handlers.len(), "publishing event");

        let mut failures = Vec::new();
        for (index, handler) in handlers.iter().enumerate() {
            if let Err(error) = handler.handle(event).await {
                warn!(event_type = %event_type, index, error = %error, "event handler failed");
                failures.push(HandlerFailure { index, error });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(EventBusError::HandlerFailed {
                event_type,
                failures,
            })
        }
    }

    async fn subscribe(
        &self,
        event_type: EventType,
        handler: Arc<dyn EventHandler>,
    ) -> EventBusResult<()> {
        let mut guard = self
            .handlers
            .write()
            .map_err(|err| EventBusError::backend(poisoned(&err)))?;
        guard.entry(event_type).or_default().push(handler);
        debug!(event_type = %event_type, "handler subscribed");
        Ok(())
    }

    fn supports_subscribe(&self) -> bool {
        true
    }
}
