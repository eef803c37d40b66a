//! Domain model for outbound email.

mod ids;
mod message;
mod sent;
mod template;

pub use ids::EmailId;
pub use message::{Attachment, EmailMessage, Recipients};
pub use sent::SentEmail;
pub use template::{EmailTemplate, TemplateError};
