//! Adapter implementations for the event ports.

pub mod forwarding;
pub mod memory;
pub mod outbox;

pub use forwarding::ForwardingEventBus;
pub use memory::InMemoryEventBus;
pub use outbox::{OUTBOX_FILE_NAME, OutboxEventSink};
