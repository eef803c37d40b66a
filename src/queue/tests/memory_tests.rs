//! Unit tests for the in-memory queue adapter.

use crate::error::ErrorKind;
use crate::queue::{
    adapters::memory::InMemoryQueue,
    domain::{QueueName, ReceiveOptions},
    ports::{MessageQueue, MessageQueueExt, QueueError},
};
use rstest::{fixture, rstest};
use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::json;

#[fixture]
fn queue() -> InMemoryQueue {
    InMemoryQueue::new()
}

fn jobs() -> QueueName {
    QueueName::new("jobs").expect("valid queue name")
}

fn batch(size: usize) -> ReceiveOptions {
    ReceiveOptions::with_max_messages(size).expect("non-zero batch")
}

struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("refusing to serialise"))
    }
}

#[rstest]
#[tokio::test]
async fn receive_preserves_send_order(queue: InMemoryQueue) {
    for value in 1..=3 {
        queue
            .send(&jobs(), json!({ "value": value }))
            .await
            .expect("send should succeed");
    }

    let received = queue
        .receive(&jobs(), batch(10))
        .await
        .expect("receive should succeed");

    let values: Vec<_> = received.iter().map(|m| m.body()["value"].clone()).collect();
    assert_eq!(values, vec![json!(1), json!(2), json!(3)]);
}

#[rstest]
#[tokio::test]
async fn receive_honours_max_messages(queue: InMemoryQueue) {
    for value in 0..5 {
        queue
            .send(&jobs(), json!(value))
            .await
            .expect("send should succeed");
    }

    let received = queue
        .receive(&jobs(), batch(2))
        .await
        .expect("receive should succeed");

    assert_eq!(received.len(), 2);
    assert_eq!(queue.len(&jobs()), 5);
}

#[rstest]
#[tokio::test]
async fn redelivery_increments_attempts(queue: InMemoryQueue) {
    queue
        .send(&jobs(), json!("work"))
        .await
        .expect("send should succeed");

    let first = queue.receive(&jobs(), batch(1)).await.expect("receive");
    let second = queue.receive(&jobs(), batch(1)).await.expect("receive");

    assert_eq!(first[0].attempts(), 0);
    assert_eq!(second[0].attempts(), 1);
    assert_eq!(first[0].id(), second[0].id());
}

#[rstest]
#[tokio::test]
async fn unknown_queue_receives_empty(queue: InMemoryQueue) {
    let received = queue
        .receive(&jobs(), ReceiveOptions::default())
        .await
        .expect("receive should succeed");
    assert!(received.is_empty());
}

#[rstest]
#[tokio::test]
async fn delete_of_unknown_id_is_noop(queue: InMemoryQueue) {
    queue
        .send(&jobs(), json!(1))
        .await
        .expect("send should succeed");

    queue
        .delete(&jobs(), crate::queue::domain::MessageId::new())
        .await
        .expect("delete should succeed");

    assert_eq!(queue.len(&jobs()), 1);
}

#[rstest]
#[tokio::test]
async fn send_json_rejects_unserializable_body(queue: InMemoryQueue) {
    let result = queue.send_json(&jobs(), &Unserializable).await;

    let err = result.expect_err("serialisation must fail");
    assert!(matches!(err, QueueError::InvalidBody(_)));
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(queue.is_empty(&jobs()));
}

#[rstest]
#[tokio::test]
async fn send_json_serialises_typed_body(queue: InMemoryQueue) {
    #[derive(serde::Serialize)]
    struct Job {
        value: u32,
    }

    queue
        .send_json(&jobs(), &Job { value: 7 })
        .await
        .expect("send should succeed");

    let received = queue.receive(&jobs(), batch(1)).await.expect("receive");
    assert_eq!(received[0].body(), &json!({ "value": 7 }));
}
