//! Email conformance cases.

use chrono::Utc;

use super::{BoxFuture, CaseContext, CaseResult, ConformanceCase, ensure, ensure_eq, fail};
use crate::email::{
    domain::{Attachment, EmailMessage, Recipients},
    ports::EmailSender,
};
use crate::error::ErrorKind;

/// The email property table.
#[must_use]
pub fn cases() -> Vec<ConformanceCase<dyn EmailSender>> {
    vec![
        ConformanceCase {
            name: "required_fields_are_echoed",
            run: required_fields_are_echoed,
        },
        ConformanceCase {
            name: "recipient_lists_are_accepted",
            run: recipient_lists_are_accepted,
        },
        ConformanceCase {
            name: "optional_fields_are_echoed",
            run: optional_fields_are_echoed,
        },
        ConformanceCase {
            name: "each_send_gets_a_fresh_id",
            run: each_send_gets_a_fresh_id,
        },
        ConformanceCase {
            name: "sent_at_is_not_before_the_call",
            run: sent_at_is_not_before_the_call,
        },
        ConformanceCase {
            name: "empty_recipient_list_is_rejected",
            run: empty_recipient_list_is_rejected,
        },
    ]
}

fn welcome() -> EmailMessage {
    EmailMessage::new("ada@example.com", "Welcome aboard", "<p>Hello, Ada</p>")
}

fn required_fields_are_echoed(sender: &dyn EmailSender) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let message = welcome();
        let sent = sender.send(&message).await.context("send")?;

        ensure_eq("to", sent.to(), message.to())?;
        ensure_eq("subject", sent.subject(), message.subject())?;
        ensure_eq("html", sent.html(), message.html())?;
        ensure(!sent.id().to_string().is_empty(), || "empty id".to_owned())
    })
}

fn recipient_lists_are_accepted(sender: &dyn EmailSender) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let message = EmailMessage::new(
            vec!["ada@example.com".to_owned(), "grace@example.com".to_owned()],
            "Team update",
            "<p>Status</p>",
        );
        let sent = sender.send(&message).await.context("send")?;

        ensure_eq(
            "to",
            sent.to(),
            &Recipients::Many(vec![
                "ada@example.com".to_owned(),
                "grace@example.com".to_owned(),
            ]),
        )
    })
}

fn optional_fields_are_echoed(sender: &dyn EmailSender) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let message = welcome()
            .with_from("team@example.com")
            .with_text("Hello, Ada")
            .with_reply_to("support@example.com")
            .with_attachment(
                Attachment::new("terms.txt", b"be excellent".to_vec())
                    .with_content_type("text/plain"),
            );
        let sent = sender.send(&message).await.context("send")?;

        ensure_eq("message", sent.message(), &message)
    })
}

fn each_send_gets_a_fresh_id(sender: &dyn EmailSender) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let message = welcome();
        let first = sender.send(&message).await.context("first send")?;
        let second = sender.send(&message).await.context("second send")?;

        ensure(first.id() != second.id(), || {
            format!("two sends shared id {}", first.id())
        })
    })
}

fn sent_at_is_not_before_the_call(sender: &dyn EmailSender) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let started = Utc::now();
        let sent = sender.send(&welcome()).await.context("send")?;

        ensure(sent.sent_at() >= started, || {
            format!("sent_at {} precedes call start {started}", sent.sent_at())
        })
    })
}

fn empty_recipient_list_is_rejected(sender: &dyn EmailSender) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let message = EmailMessage::new(Vec::<String>::new(), "Nobody", "<p>?</p>");
        match sender.send(&message).await {
            Ok(sent) => Err(fail(format!("message without recipients was sent as {}", sent.id()))),
            Err(err) => ensure_eq("error kind", &err.kind(), &ErrorKind::Validation),
        }
    })
}
