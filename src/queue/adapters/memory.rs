//! In-memory implementation of the [`MessageQueue`] port.
//!
//! Messages are kept per queue in FIFO order. A message stays in its queue
//! after delivery until it is deleted or purged, and each delivery bumps its
//! attempt counter. Suitable for tests and local development only.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use serde_json::Value;
use tracing::debug;

use crate::error::poisoned;
use crate::queue::{
    domain::{MessageId, QueueMessage, QueueName, ReceiveOptions},
    ports::{MessageQueue, QueueError, QueueResult},
};

/// Thread-safe in-memory message queue.
///
/// # Example
///
/// ```
/// use switchyard::queue::adapters::memory::InMemoryQueue;
///
/// let queue = InMemoryQueue::new();
/// // Send and receive through the MessageQueue trait...
/// # let _ = queue;
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryQueue<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    queues: Arc<RwLock<HashMap<QueueName, VecDeque<QueueMessage>>>>,
    clock: Arc<C>,
}

impl InMemoryQueue<DefaultClock> {
    /// Creates an empty queue store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryQueue<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryQueue<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty queue store using the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            queues: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Returns the number of messages waiting in the named queue.
    ///
    /// Returns `0` if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self, queue: &QueueName) -> usize {
        self.queues
            .read()
            .map(|guard| guard.get(queue).map_or(0, VecDeque::len))
            .unwrap_or(0)
    }

    /// Returns `true` if the named queue holds no messages.
    #[must_use]
    pub fn is_empty(&self, queue: &QueueName) -> bool {
        self.len(queue) == 0
    }
}

#[async_trait]
impl<C> MessageQueue for InMemoryQueue<C>
where
    C: Clock + Send + Sync,
{
    async fn send(&self, queue: &QueueName, body: Value) -> QueueResult<MessageId> {
        let message = QueueMessage::new(body, &*self.clock);
        let id = message.id();
        let mut guard = self
            .queues
            .write()
            .map_err(|err| QueueError::backend(poisoned(&err)))?;
        guard.entry(queue.clone()).or_default().push_back(message);
        debug!(queue = %queue, message_id = %id, "message sent");
        Ok(id)
    }

    async fn receive(
        &self,
        queue: &QueueName,
        options: ReceiveOptions,
    ) -> QueueResult<Vec<QueueMessage>> {
        let mut guard = self
            .queues
            .write()
            .map_err(|err| QueueError::backend(poisoned(&err)))?;
        let Some(messages) = guard.get_mut(queue) else {
            return Ok(Vec::new());
        };

        let batch: Vec<QueueMessage> = messages
            .iter_mut()
            .take(options.max_messages())
            .map(|message| {
                let delivered = message.clone();
                message.record_delivery();
                delivered
            })
            .collect();
        debug!(queue = %queue, count = batch.len(), "messages received");
        Ok(batch)
    }

    async fn delete(&self, queue: &QueueName, id: MessageId) -> QueueResult<()> {
        let mut guard = self
            .queues
            .write()
            .map_err(|err| QueueError::backend(poisoned(&err)))?;
        if let Some(messages) = guard.get_mut(queue) {
            messages.retain(|message| message.id() != id);
            debug!(queue = %queue, message_id = %id, "message deleted");
        }
        Ok(())
    }

    async fn purge(&self, queue: &QueueName) -> QueueResult<()> {
        let mut guard = self
            .queues
            .write()
            .map_err(|err| QueueError::backend(poisoned(&err)))?;
        guard.remove(queue);
        debug!(queue = %queue, "queue purged");
        Ok(())
    }
}
