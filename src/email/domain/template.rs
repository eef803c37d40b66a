//! Email templates rendered with `minijinja`.

use super::{EmailMessage, Recipients};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error raised while rendering an email template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render {part} of email template: {reason}")]
pub struct TemplateError {
    /// Which part of the template failed (`subject`, `html` or `text`).
    pub part: &'static str,
    /// Renderer diagnostic.
    pub reason: String,
}

/// Subject and body templates for a notification email.
///
/// # Examples
///
/// ```
/// use switchyard::email::domain::EmailTemplate;
/// use serde_json::json;
///
/// let template = EmailTemplate::new("Welcome, {{ name }}", "<p>Hi {{ name }}</p>");
/// let message = template
///     .render("ada@example.com", &json!({ "name": "Ada" }))
///     .expect("template renders");
/// assert_eq!(message.subject(), "Welcome, Ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    subject: String,
    html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl EmailTemplate {
    /// Creates a template from subject and HTML sources.
    #[must_use]
    pub fn new(subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            html: html.into(),
            text: None,
        }
    }

    /// Adds a plain-text body source.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Renders every part against `context` and builds a message for `to`.
    ///
    /// The HTML body is rendered with HTML auto-escaping; subject and text
    /// are rendered verbatim. Undefined variables are rejected rather than
    /// rendered empty.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] naming the first part that fails to parse
    /// or render.
    pub fn render(
        &self,
        to: impl Into<Recipients>,
        context: &Value,
    ) -> Result<EmailMessage, TemplateError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|name| {
            if name.ends_with(".html") {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });

        let subject = render_part(&env, "subject", "subject.txt", &self.subject, context)?;
        let html = render_part(&env, "html", "body.html", &self.html, context)?;
        let mut message = EmailMessage::new(to, subject.trim(), html);
        if let Some(source) = &self.text {
            message = message.with_text(render_part(&env, "text", "body.txt", source, context)?);
        }
        Ok(message)
    }
}

fn render_part<'source>(
    env: &Environment<'source>,
    part: &'static str,
    name: &'source str,
    source: &'source str,
    context: &Value,
) -> Result<String, TemplateError> {
    env.template_from_named_str(name, source)
        .and_then(|template| template.render(context))
        .map_err(|err| TemplateError {
            part,
            reason: err.to_string(),
        })
}
