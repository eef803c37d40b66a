//! Event bus conformance cases.
//!
//! Fan-out cases are skipped on buses that report
//! `supports_subscribe() == false`; those buses must instead reject
//! `subscribe` with an unsupported-operation error.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{BoxFuture, CaseContext, CaseResult, ConformanceCase, ensure_eq, fail, skip};
use crate::error::ErrorKind;
use crate::events::{
    domain::{DomainEvent, EventType, ProjectCreated, UserCreated},
    ports::{EventBus, EventHandler, handler_fn},
};

/// The event bus property table.
#[must_use]
pub fn cases() -> Vec<ConformanceCase<dyn EventBus>> {
    vec![
        ConformanceCase {
            name: "publish_without_subscribers_succeeds",
            run: publish_without_subscribers_succeeds,
        },
        ConformanceCase {
            name: "subscriber_runs_once_per_publish",
            run: subscriber_runs_once_per_publish,
        },
        ConformanceCase {
            name: "other_event_types_are_not_delivered",
            run: other_event_types_are_not_delivered,
        },
        ConformanceCase {
            name: "every_handler_for_a_type_runs",
            run: every_handler_for_a_type_runs,
        },
        ConformanceCase {
            name: "publish_awaits_handlers",
            run: publish_awaits_handlers,
        },
        ConformanceCase {
            name: "unsupported_subscribe_fails_fast",
            run: unsupported_subscribe_fails_fast,
        },
    ]
}

fn user_created() -> DomainEvent {
    DomainEvent::UserCreated(UserCreated {
        user_id: "u-1".to_owned(),
        email: "ada@example.com".to_owned(),
    })
}

fn project_created() -> DomainEvent {
    DomainEvent::ProjectCreated(ProjectCreated {
        project_id: "p-1".to_owned(),
        owner_id: "u-1".to_owned(),
        name: "Launch".to_owned(),
    })
}

fn counting_handler(counter: &Arc<AtomicUsize>) -> Arc<dyn EventHandler> {
    let shared = Arc::clone(counter);
    Arc::new(handler_fn(move |_event| {
        let inner = Arc::clone(&shared);
        async move {
            inner.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }))
}

fn require_subscribe(bus: &dyn EventBus) -> CaseResult {
    if bus.supports_subscribe() {
        Ok(())
    } else {
        Err(skip("bus does not support runtime subscriptions"))
    }
}

fn publish_without_subscribers_succeeds(bus: &dyn EventBus) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        bus.publish(&user_created()).await.context("publish user")?;
        bus.publish(&project_created())
            .await
            .context("publish project")
    })
}

fn subscriber_runs_once_per_publish(bus: &dyn EventBus) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        require_subscribe(bus)?;
        let calls = Arc::new(AtomicUsize::new(0));
        bus.subscribe(EventType::UserCreated, counting_handler(&calls))
            .await
            .context("subscribe")?;

        bus.publish(&user_created()).await.context("publish")?;
        ensure_eq("calls after one publish", &calls.load(Ordering::SeqCst), &1)?;
        bus.publish(&user_created()).await.context("publish")?;
        ensure_eq("calls after two publishes", &calls.load(Ordering::SeqCst), &2)
    })
}

fn other_event_types_are_not_delivered(bus: &dyn EventBus) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        require_subscribe(bus)?;
        let calls = Arc::new(AtomicUsize::new(0));
        bus.subscribe(EventType::ProjectPublished, counting_handler(&calls))
            .await
            .context("subscribe")?;

        bus.publish(&project_created()).await.context("publish")?;
        bus.publish(&user_created()).await.context("publish")?;
        ensure_eq("calls", &calls.load(Ordering::SeqCst), &0)
    })
}

fn every_handler_for_a_type_runs(bus: &dyn EventBus) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        require_subscribe(bus)?;
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        bus.subscribe(EventType::ProjectCreated, counting_handler(&first))
            .await
            .context("subscribe first")?;
        bus.subscribe(EventType::ProjectCreated, counting_handler(&second))
            .await
            .context("subscribe second")?;

        bus.publish(&project_created()).await.context("publish")?;
        ensure_eq("first handler calls", &first.load(Ordering::SeqCst), &1)?;
        ensure_eq("second handler calls", &second.load(Ordering::SeqCst), &1)
    })
}

fn publish_awaits_handlers(bus: &dyn EventBus) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        require_subscribe(bus)?;
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);
        let slow = handler_fn(move |_event| {
            let inner = Arc::clone(&flag);
            async move {
                for _ in 0..3 {
                    tokio::task::yield_now().await;
                }
                inner.store(true, Ordering::SeqCst);
                Ok(())
            }
        });
        bus.subscribe(EventType::UserCreated, Arc::new(slow))
            .await
            .context("subscribe")?;

        bus.publish(&user_created()).await.context("publish")?;
        ensure_eq("handler finished", &finished.load(Ordering::SeqCst), &true)
    })
}

fn unsupported_subscribe_fails_fast(bus: &dyn EventBus) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        if bus.supports_subscribe() {
            return Err(skip("bus supports runtime subscriptions"));
        }
        let calls = Arc::new(AtomicUsize::new(0));
        match bus
            .subscribe(EventType::UserCreated, counting_handler(&calls))
            .await
        {
            Ok(()) => Err(fail("subscribe was accepted by a bus that cannot deliver")),
            Err(err) => ensure_eq("error kind", &err.kind(), &ErrorKind::Unsupported),
        }
    })
}
