//! Unit tests for the in-memory event bus.

use super::{project_created, user_created};
use crate::error::ErrorKind;
use crate::events::{
    adapters::memory::InMemoryEventBus,
    domain::{DomainEvent, EventType},
    ports::{EventBus, EventBusError, HandlerError, handler_fn},
};
use rstest::{fixture, rstest};
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<String>>>;

#[fixture]
fn bus() -> InMemoryEventBus {
    InMemoryEventBus::new()
}

#[fixture]
fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

async fn record(bus: &InMemoryEventBus, event_type: EventType, log: &Log, label: &'static str) {
    let sink = Arc::clone(log);
    let handler = handler_fn(move |event: DomainEvent| {
        let inner = Arc::clone(&sink);
        async move {
            inner
                .lock()
                .expect("log lock")
                .push(format!("{label}:{}", event.event_type()));
            Ok(())
        }
    });
    bus.subscribe(event_type, Arc::new(handler))
        .await
        .expect("subscribe should succeed");
}

async fn fail(bus: &InMemoryEventBus, event_type: EventType, message: &'static str) {
    let handler = handler_fn(move |_event| async move { Err(HandlerError::new(message)) });
    bus.subscribe(event_type, Arc::new(handler))
        .await
        .expect("subscribe should succeed");
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().expect("log lock").clone()
}

#[rstest]
#[tokio::test]
async fn publish_without_subscribers_succeeds(bus: InMemoryEventBus) {
    assert!(bus.supports_subscribe());
    bus.publish(&user_created("u-1"))
        .await
        .expect("publish should succeed");
}

#[rstest]
#[tokio::test]
async fn handlers_only_see_their_event_type(bus: InMemoryEventBus, log: Log) {
    record(&bus, EventType::UserCreated, &log, "users").await;
    record(&bus, EventType::ProjectCreated, &log, "projects").await;

    bus.publish(&user_created("u-1")).await.expect("publish");
    bus.publish(&project_created("p-1")).await.expect("publish");

    assert_eq!(
        entries(&log),
        vec!["users:user.created", "projects:project.created"]
    );
    assert_eq!(bus.subscription_count(), 2);
}

#[rstest]
#[tokio::test]
async fn handlers_run_in_registration_order(bus: InMemoryEventBus, log: Log) {
    record(&bus, EventType::UserCreated, &log, "first").await;
    record(&bus, EventType::UserCreated, &log, "second").await;
    record(&bus, EventType::UserCreated, &log, "third").await;

    bus.publish(&user_created("u-1")).await.expect("publish");

    assert_eq!(
        entries(&log),
        vec![
            "first:user.created",
            "second:user.created",
            "third:user.created"
        ]
    );
}

#[rstest]
#[tokio::test]
async fn failing_handler_does_not_stop_siblings(bus: InMemoryEventBus, log: Log) {
    record(&bus, EventType::UserCreated, &log, "before").await;
    fail(&bus, EventType::UserCreated, "mailer down").await;
    record(&bus, EventType::UserCreated, &log, "after").await;

    let err = bus
        .publish(&user_created("u-1"))
        .await
        .expect_err("publish should report the failure");

    assert_eq!(entries(&log), vec!["before:user.created", "after:user.created"]);
    assert_eq!(err.kind(), ErrorKind::HandlerFailed);
    match err {
        EventBusError::HandlerFailed {
            event_type,
            failures,
        } => {
            assert_eq!(event_type, EventType::UserCreated);
            assert_eq!(failures.len(), 1);
            assert_eq!(failures.first().map(|failure| failure.index), Some(1));
        }
        other => panic!("expected HandlerFailed, got {other:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn every_failure_is_reported(bus: InMemoryEventBus) {
    fail(&bus, EventType::ProjectCreated, "one").await;
    fail(&bus, EventType::ProjectCreated, "two").await;

    let err = bus
        .publish(&project_created("p-1"))
        .await
        .expect_err("publish should fail");

    let message = err.to_string();
    assert!(message.contains("2 handler(s) failed"), "{message}");
    assert!(message.contains("one") && message.contains("two"), "{message}");
}

#[rstest]
#[tokio::test]
async fn clear_drops_subscriptions(bus: InMemoryEventBus, log: Log) {
    record(&bus, EventType::UserCreated, &log, "gone").await;
    bus.clear().expect("clear");

    bus.publish(&user_created("u-1")).await.expect("publish");

    assert!(entries(&log).is_empty());
    assert_eq!(bus.subscription_count(), 0);
}
