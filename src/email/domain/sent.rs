//! Record of an accepted email.

use super::{Attachment, EmailId, EmailMessage, Recipients};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// An email accepted by a transport.
///
/// Carries the original message unchanged plus the transport-assigned
/// identifier and send instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    id: EmailId,
    sent_at: DateTime<Utc>,
    #[serde(flatten)]
    message: EmailMessage,
}

impl SentEmail {
    /// Stamps `message` with a fresh identifier and the current instant.
    #[must_use]
    pub fn accept(message: EmailMessage, clock: &impl Clock) -> Self {
        Self {
            id: EmailId::new(),
            sent_at: clock.utc(),
            message,
        }
    }

    /// Returns the transport identifier.
    #[must_use]
    pub const fn id(&self) -> EmailId {
        self.id
    }

    /// Returns when the transport accepted the email.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Returns the message as submitted.
    #[must_use]
    pub const fn message(&self) -> &EmailMessage {
        &self.message
    }

    /// Returns the recipients.
    #[must_use]
    pub const fn to(&self) -> &Recipients {
        self.message.to()
    }

    /// Returns the sender override, if any.
    #[must_use]
    pub fn from(&self) -> Option<&str> {
        self.message.from()
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.subject()
    }

    /// Returns the HTML body.
    #[must_use]
    pub fn html(&self) -> &str {
        self.message.html()
    }

    /// Returns the plain-text body, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.message.text()
    }

    /// Returns the reply-to address, if any.
    #[must_use]
    pub fn reply_to(&self) -> Option<&str> {
        self.message.reply_to()
    }

    /// Returns the attachments.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        self.message.attachments()
    }
}
