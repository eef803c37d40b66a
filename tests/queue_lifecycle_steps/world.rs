//! Shared world state for queue lifecycle BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use switchyard::queue::{
    adapters::memory::InMemoryQueue,
    domain::{MessageId, QueueMessage, QueueName},
    ports::QueueError,
};

/// Scenario world for queue behaviour tests.
pub struct QueueWorld {
    /// The queue under test.
    pub queue: Arc<InMemoryQueue>,
    /// Identifiers of sent messages, in send order.
    pub sent: Vec<MessageId>,
    /// Result of the last receive call.
    pub last_received: Option<Vec<QueueMessage>>,
    /// Error from the last rejected receive call.
    pub last_error: Option<QueueError>,
}

impl QueueWorld {
    /// Creates a world around a fresh queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: Arc::new(InMemoryQueue::new()),
            sent: Vec::new(),
            last_received: None,
            last_error: None,
        }
    }
}

impl Default for QueueWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> QueueWorld {
    QueueWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a queue name used in a step.
pub fn queue_name(raw: &str) -> Result<QueueName, eyre::Report> {
    QueueName::new(raw).map_err(|err| eyre::eyre!("invalid queue name '{raw}': {err}"))
}
