//! Port contracts for event publishing.

pub mod bus;
pub mod handler;
pub mod sink;

pub use bus::{EventBus, EventBusError, EventBusResult, HandlerFailure};
pub use handler::{EventHandler, HandlerError, handler_fn};
pub use sink::{EventSink, SinkError};
#[cfg(test)]
pub use sink::MockEventSink;
