//! Port contracts for message queues.

pub mod queue;

pub use queue::{MessageQueue, MessageQueueExt, QueueError, QueueResult};
