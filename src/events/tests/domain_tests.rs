//! Unit tests for event domain types.

use super::{project_created, user_created};
use crate::clock::ManualClock;
use crate::events::domain::{
    DomainEvent, EventEnvelope, EventType, ParseEventTypeError, ProjectPublished, UserUpdated,
};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(EventType::UserCreated, "user.created")]
#[case(EventType::UserUpdated, "user.updated")]
#[case(EventType::ProjectCreated, "project.created")]
#[case(EventType::ProjectPublished, "project.published")]
fn event_types_round_trip_through_wire_names(#[case] event_type: EventType, #[case] wire: &str) {
    assert_eq!(event_type.as_str(), wire);
    assert_eq!(event_type.to_string(), wire);
    assert_eq!(EventType::try_from(wire), Ok(event_type));
}

#[rstest]
fn unknown_event_type_is_rejected() {
    assert_eq!(
        EventType::try_from("user.deleted"),
        Err(ParseEventTypeError("user.deleted".to_owned()))
    );
}

#[rstest]
#[case(user_created("u-1"), EventType::UserCreated, "app.users")]
#[case(
    DomainEvent::UserUpdated(UserUpdated {
        user_id: "u-1".to_owned(),
        changed_fields: vec!["email".to_owned()],
    }),
    EventType::UserUpdated,
    "app.users"
)]
#[case(project_created("p-1"), EventType::ProjectCreated, "app.projects")]
#[case(
    DomainEvent::ProjectPublished(ProjectPublished {
        project_id: "p-1".to_owned(),
        url: "https://example.com/p-1".to_owned(),
    }),
    EventType::ProjectPublished,
    "app.projects"
)]
fn events_report_type_and_source(
    #[case] event: DomainEvent,
    #[case] expected_type: EventType,
    #[case] expected_source: &str,
) {
    assert_eq!(event.event_type(), expected_type);
    assert_eq!(event.source(), expected_source);
}

#[rstest]
fn events_serialise_with_type_tag() {
    let value = serde_json::to_value(user_created("u-7")).expect("event serialises");

    assert_eq!(
        value,
        json!({
            "type": "user.created",
            "data": {"user_id": "u-7", "email": "u-7@example.com"}
        })
    );
}

#[rstest]
fn envelope_carries_routing_metadata() {
    let at = Utc
        .with_ymd_and_hms(2026, 5, 4, 12, 0, 0)
        .single()
        .expect("valid instant");
    let clock = ManualClock::new(at);

    let plain = EventEnvelope::wrap(project_created("p-2"), None, &clock);
    let prefixed = EventEnvelope::wrap(project_created("p-2"), Some("staging"), &clock);

    assert_eq!(plain.source, "app.projects");
    assert_eq!(prefixed.source, "staging.app.projects");
    assert_eq!(plain.event_type, EventType::ProjectCreated);
    assert_eq!(plain.occurred_at, at);
    assert_ne!(plain.id, prefixed.id);
}
