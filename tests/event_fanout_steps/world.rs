//! Shared world state for event fan-out BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rstest::fixture;
use switchyard::events::{
    adapters::{InMemoryEventBus, OutboxEventSink},
    domain::{
        DomainEvent, EventType, ProjectCreated, ProjectPublished, UserCreated, UserUpdated,
    },
    ports::{EventBus, EventBusError, EventHandler, HandlerError, handler_fn},
};
use tempfile::TempDir;

/// Scenario world for event bus behaviour tests.
pub struct EventWorld {
    /// The bus under test.
    pub bus: Arc<dyn EventBus>,
    /// Outbox behind a forwarding bus, when one is in use.
    pub outbox: Option<Arc<OutboxEventSink>>,
    /// Keeps the outbox directory alive.
    pub scratch: Option<TempDir>,
    /// Invocation counters keyed by handler label.
    pub counters: HashMap<String, Arc<AtomicUsize>>,
    /// Result of the last publish.
    pub last_publish: Option<Result<(), EventBusError>>,
    /// Result of the last subscribe.
    pub last_subscribe: Option<Result<(), EventBusError>>,
}

impl EventWorld {
    /// Creates a world around a fresh in-memory bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bus: Arc::new(InMemoryEventBus::new()),
            outbox: None,
            scratch: None,
            counters: HashMap::new(),
            last_publish: None,
            last_subscribe: None,
        }
    }

    /// Returns a handler counting its invocations under `label`.
    pub fn counting_handler(&mut self, label: &str) -> Arc<dyn EventHandler> {
        let counter = Arc::clone(
            self.counters
                .entry(label.to_owned())
                .or_insert_with(|| Arc::new(AtomicUsize::new(0))),
        );
        Arc::new(handler_fn(move |_event| {
            let inner = Arc::clone(&counter);
            async move {
                inner.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }))
    }

    /// Returns how often the handler labelled `label` ran.
    pub fn count(&self, label: &str) -> usize {
        self.counters
            .get(label)
            .map_or(0, |counter| counter.load(Ordering::SeqCst))
    }
}

impl Default for EventWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> EventWorld {
    EventWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses an event type named in a step.
pub fn event_type(raw: &str) -> Result<EventType, eyre::Report> {
    EventType::try_from(raw).map_err(|err| eyre::eyre!("{err}"))
}

/// Builds a sample event of the given type.
pub fn sample_event(event_type: EventType) -> DomainEvent {
    match event_type {
        EventType::UserCreated => DomainEvent::UserCreated(UserCreated {
            user_id: "u-1".to_owned(),
            email: "ada@example.com".to_owned(),
        }),
        EventType::UserUpdated => DomainEvent::UserUpdated(UserUpdated {
            user_id: "u-1".to_owned(),
            changed_fields: vec!["display_name".to_owned()],
        }),
        EventType::ProjectCreated => DomainEvent::ProjectCreated(ProjectCreated {
            project_id: "p-1".to_owned(),
            owner_id: "u-1".to_owned(),
            name: "Launch".to_owned(),
        }),
        EventType::ProjectPublished => DomainEvent::ProjectPublished(ProjectPublished {
            project_id: "p-1".to_owned(),
            url: "https://example.com/p-1".to_owned(),
        }),
    }
}

/// Returns a handler that always fails.
pub fn failing_handler() -> Arc<dyn EventHandler> {
    Arc::new(handler_fn(|_event| async {
        Err(HandlerError::new("handler exploded"))
    }))
}
