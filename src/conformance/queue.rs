//! Queue conformance cases.

use std::collections::{BTreeMap, HashSet};

use serde_json::{Value, json};
use uuid::Uuid;

use super::{
    BoxFuture, CaseContext, CaseError, CaseResult, ConformanceCase, ensure, ensure_eq, fail,
};
use crate::error::ErrorKind;
use crate::queue::{
    domain::{QueueMessage, QueueName, ReceiveOptions},
    ports::{MessageQueue, MessageQueueExt},
};

/// The queue property table.
#[must_use]
pub fn cases() -> Vec<ConformanceCase<dyn MessageQueue>> {
    vec![
        ConformanceCase {
            name: "sent_message_is_received",
            run: sent_message_is_received,
        },
        ConformanceCase {
            name: "send_yields_fresh_ids",
            run: send_yields_fresh_ids,
        },
        ConformanceCase {
            name: "deleted_message_is_not_received",
            run: deleted_message_is_not_received,
        },
        ConformanceCase {
            name: "delete_of_unknown_id_is_a_no_op",
            run: delete_of_unknown_id_is_a_no_op,
        },
        ConformanceCase {
            name: "purge_empties_only_the_named_queue",
            run: purge_empties_only_the_named_queue,
        },
        ConformanceCase {
            name: "queue_names_partition_messages",
            run: queue_names_partition_messages,
        },
        ConformanceCase {
            name: "empty_queue_receives_nothing",
            run: empty_queue_receives_nothing,
        },
        ConformanceCase {
            name: "receive_honours_max_messages",
            run: receive_honours_max_messages,
        },
        ConformanceCase {
            name: "unserialisable_body_is_rejected",
            run: unserialisable_body_is_rejected,
        },
        ConformanceCase {
            name: "send_receive_delete_scenario",
            run: send_receive_delete_scenario,
        },
    ]
}

fn fresh_queue(label: &str) -> Result<QueueName, CaseError> {
    QueueName::new(format!("{label}-{}", Uuid::new_v4().simple())).context("queue name")
}

fn bodies(messages: &[QueueMessage]) -> Vec<Value> {
    messages.iter().map(|message| message.body().clone()).collect()
}

fn sent_message_is_received(queue: &dyn MessageQueue) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let name = fresh_queue("received")?;
        let body = json!({"task": "resize", "sizes": [64, 128], "urgent": true});
        let id = queue.send(&name, body.clone()).await.context("send")?;

        let received = queue
            .receive(&name, ReceiveOptions::default())
            .await
            .context("receive")?;

        let found = received.iter().find(|message| message.id() == id);
        match found {
            Some(message) => ensure_eq("body", message.body(), &body),
            None => Err(fail(format!("message {id} was not received"))),
        }
    })
}

fn send_yields_fresh_ids(queue: &dyn MessageQueue) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let name = fresh_queue("ids")?;
        let mut ids = HashSet::new();
        for n in 0..5 {
            let id = queue.send(&name, json!({"n": n})).await.context("send")?;
            ensure(ids.insert(id), || format!("id {id} was issued twice"))?;
        }
        CaseResult::Ok(())
    })
}

fn deleted_message_is_not_received(queue: &dyn MessageQueue) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let name = fresh_queue("deleted")?;
        let doomed = queue.send(&name, json!("doomed")).await.context("send")?;
        let kept = queue.send(&name, json!("kept")).await.context("send")?;

        queue.delete(&name, doomed).await.context("delete")?;
        let received = queue
            .receive(&name, ReceiveOptions::default())
            .await
            .context("receive")?;

        ensure(received.iter().all(|message| message.id() != doomed), || {
            format!("deleted message {doomed} was received")
        })?;
        ensure(received.iter().any(|message| message.id() == kept), || {
            format!("surviving message {kept} was not received")
        })
    })
}

fn delete_of_unknown_id_is_a_no_op(queue: &dyn MessageQueue) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let name = fresh_queue("unknown")?;
        let id = queue.send(&name, json!(1)).await.context("send")?;

        queue.delete(&name, id).await.context("first delete")?;
        queue.delete(&name, id).await.context("repeated delete")?;
        queue
            .delete(&fresh_queue("never-used")?, id)
            .await
            .context("delete on unused queue")
    })
}

fn purge_empties_only_the_named_queue(queue: &dyn MessageQueue) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let purged = fresh_queue("purged")?;
        let untouched = fresh_queue("untouched")?;
        queue.send(&purged, json!("a")).await.context("send")?;
        queue.send(&purged, json!("b")).await.context("send")?;
        queue.send(&untouched, json!("c")).await.context("send")?;

        queue.purge(&purged).await.context("purge")?;
        queue.purge(&purged).await.context("repeated purge")?;

        let after = queue
            .receive(&purged, ReceiveOptions::default())
            .await
            .context("receive purged")?;
        ensure(after.is_empty(), || {
            format!("purged queue still returned {} message(s)", after.len())
        })?;
        let other = queue
            .receive(&untouched, ReceiveOptions::default())
            .await
            .context("receive untouched")?;
        ensure_eq("untouched bodies", &bodies(&other), &vec![json!("c")])
    })
}

fn queue_names_partition_messages(queue: &dyn MessageQueue) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let left = fresh_queue("left")?;
        let right = fresh_queue("right")?;
        queue.send(&left, json!("left only")).await.context("send")?;

        let received = queue
            .receive(&right, ReceiveOptions::default())
            .await
            .context("receive")?;
        ensure(received.is_empty(), || {
            "a message sent to one queue was received from another".to_owned()
        })
    })
}

fn empty_queue_receives_nothing(queue: &dyn MessageQueue) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let received = queue
            .receive(&fresh_queue("empty")?, ReceiveOptions::default())
            .await
            .context("receive")?;
        ensure(received.is_empty(), || "unused queue returned messages".to_owned())
    })
}

fn receive_honours_max_messages(queue: &dyn MessageQueue) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let name = fresh_queue("bounded")?;
        for n in 0..3 {
            queue.send(&name, json!(n)).await.context("send")?;
        }
        let options = ReceiveOptions::with_max_messages(2).context("receive options")?;

        let received = queue.receive(&name, options).await.context("receive")?;
        ensure(received.len() <= 2, || {
            format!("asked for at most 2 messages, got {}", received.len())
        })
    })
}

fn unserialisable_body_is_rejected(queue: &dyn MessageQueue) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let name = fresh_queue("invalid")?;
        let mut body = BTreeMap::new();
        body.insert((1, 2), "tuple keys have no JSON form");

        match queue.send_json(&name, &body).await {
            Ok(id) => Err(fail(format!("unserialisable body was accepted as {id}"))),
            Err(err) => ensure_eq("error kind", &err.kind(), &ErrorKind::Validation),
        }?;
        let received = queue
            .receive(&name, ReceiveOptions::default())
            .await
            .context("receive")?;
        ensure(received.is_empty(), || {
            "a rejected body reached the queue".to_owned()
        })
    })
}

fn send_receive_delete_scenario(queue: &dyn MessageQueue) -> BoxFuture<'_, CaseResult> {
    Box::pin(async move {
        let name = fresh_queue("jobs")?;
        let started = chrono::Utc::now();
        queue
            .send(&name, json!({"value": 1}))
            .await
            .context("send first")?;
        queue
            .send(&name, json!({"value": 2}))
            .await
            .context("send second")?;

        let options = ReceiveOptions::with_max_messages(10).context("receive options")?;
        let received = queue.receive(&name, options).await.context("receive")?;

        ensure_eq("message count", &received.len(), &2)?;
        let mut values = bodies(&received);
        values.sort_by_key(ToString::to_string);
        ensure_eq(
            "bodies",
            &values,
            &vec![json!({"value": 1}), json!({"value": 2})],
        )?;
        for message in &received {
            ensure_eq("attempts", &message.attempts(), &0)?;
            ensure(message.timestamp() >= started - chrono::Duration::seconds(1), || {
                format!("timestamp {} predates the send", message.timestamp())
            })?;
        }

        let (first, rest) = received
            .split_first()
            .ok_or_else(|| fail("no message to delete"))?;
        queue.delete(&name, first.id()).await.context("delete")?;
        let remaining = queue.receive(&name, options).await.context("receive again")?;
        ensure_eq("remaining bodies", &bodies(&remaining), &bodies(rest))
    })
}
