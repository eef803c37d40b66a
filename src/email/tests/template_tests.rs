//! Unit tests for email template rendering.

use crate::email::domain::EmailTemplate;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn template_renders_every_part() {
    let template = EmailTemplate::new("Project {{ name }} published", "<h1>{{ name }}</h1>")
        .with_text("{{ name }} is live at {{ url }}");

    let message = template
        .render(
            "ada@example.com",
            &json!({ "name": "Atlas", "url": "https://example.com/atlas" }),
        )
        .expect("template renders");

    assert_eq!(message.subject(), "Project Atlas published");
    assert_eq!(message.html(), "<h1>Atlas</h1>");
    assert_eq!(message.text(), Some("Atlas is live at https://example.com/atlas"));
}

#[rstest]
fn html_body_is_escaped_but_subject_is_not() {
    let template = EmailTemplate::new("Hi {{ name }}", "<p>{{ name }}</p>");

    let message = template
        .render("ada@example.com", &json!({ "name": "<Ada & Co>" }))
        .expect("template renders");

    assert_eq!(message.subject(), "Hi <Ada & Co>");
    assert_eq!(message.html(), "<p>&lt;Ada &amp; Co&gt;</p>");
}

#[rstest]
fn undefined_variable_is_reported_with_part() {
    let template = EmailTemplate::new("Hello", "<p>{{ missing }}</p>");

    let err = template
        .render("ada@example.com", &json!({}))
        .expect_err("strict rendering must fail");

    assert_eq!(err.part, "html");
}
