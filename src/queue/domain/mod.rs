//! Domain model for queued messages.

mod error;
mod ids;
mod message;
mod name;
mod options;

pub use error::QueueDomainError;
pub use ids::MessageId;
pub use message::QueueMessage;
pub use name::QueueName;
pub use options::{DEFAULT_MAX_MESSAGES, ReceiveOptions};
