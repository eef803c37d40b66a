//! Outbound email message types.

use serde::{Deserialize, Serialize};

/// One recipient address or a list of them, kept exactly as supplied.
///
/// Addresses are not normalised or validated; callers own their format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    /// A single address.
    One(String),
    /// Several addresses.
    Many(Vec<String>),
}

impl Recipients {
    /// Iterates over every address.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let addresses: &[String] = match self {
            Self::One(address) => std::slice::from_ref(address),
            Self::Many(addresses) => addresses,
        };
        addresses.iter().map(String::as_str)
    }

    /// Returns the number of addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(addresses) => addresses.len(),
        }
    }

    /// Returns `true` when the list form holds no address.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for Recipients {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<String> for Recipients {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for Recipients {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

impl From<&[&str]> for Recipients {
    fn from(value: &[&str]) -> Self {
        Self::Many(value.iter().map(|address| (*address).to_owned()).collect())
    }
}

/// A file attached to an email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File name presented to the recipient.
    pub filename: String,
    /// Raw file content.
    pub content: Vec<u8>,
    /// MIME type, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl Attachment {
    /// Creates an attachment without an explicit content type.
    #[must_use]
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            content_type: None,
        }
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// An email ready to hand to a transport.
///
/// # Examples
///
/// ```
/// use switchyard::email::domain::EmailMessage;
///
/// let message = EmailMessage::new("ada@example.com", "Welcome", "<p>Hello</p>")
///     .with_text("Hello")
///     .with_reply_to("support@example.com");
/// assert_eq!(message.subject(), "Welcome");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    to: Recipients,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    subject: String,
    html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<Attachment>,
}

impl EmailMessage {
    /// Creates a message with the required fields.
    #[must_use]
    pub fn new(
        to: impl Into<Recipients>,
        subject: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            from: None,
            subject: subject.into(),
            html: html.into(),
            text: None,
            reply_to: None,
            attachments: Vec::new(),
        }
    }

    /// Overrides the sender address.
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Adds a plain-text alternative body.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the reply-to address.
    #[must_use]
    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    /// Appends an attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Returns the recipients.
    #[must_use]
    pub const fn to(&self) -> &Recipients {
        &self.to
    }

    /// Returns the sender override, if any.
    #[must_use]
    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the HTML body.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Returns the plain-text body, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the reply-to address, if any.
    #[must_use]
    pub fn reply_to(&self) -> Option<&str> {
        self.reply_to.as_deref()
    }

    /// Returns the attachments.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }
}
