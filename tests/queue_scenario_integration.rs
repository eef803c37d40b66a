//! End-to-end queue scenario against the in-memory adapter.

use rstest::rstest;
use serde_json::json;
use switchyard::providers::MockProviders;
use switchyard::queue::domain::{QueueName, ReceiveOptions};

#[rstest]
#[tokio::test]
async fn send_receive_delete_round_trip() {
    let mocks = MockProviders::new().expect("mocks build");
    let queue = mocks.providers().queue;
    let jobs = QueueName::new("jobs").expect("valid name");

    let first = queue.send(&jobs, json!({"value": 1})).await.expect("send");
    queue.send(&jobs, json!({"value": 2})).await.expect("send");

    let options = ReceiveOptions::with_max_messages(10).expect("valid options");
    let received = queue.receive(&jobs, options).await.expect("receive");

    let bodies: Vec<_> = received.iter().map(|message| message.body().clone()).collect();
    assert_eq!(bodies, vec![json!({"value": 1}), json!({"value": 2})]);
    assert!(received.iter().all(|message| message.attempts() == 0));

    queue.delete(&jobs, first).await.expect("delete");
    let remaining = queue.receive(&jobs, options).await.expect("receive");

    let remaining_bodies: Vec<_> = remaining
        .iter()
        .map(|message| message.body().clone())
        .collect();
    assert_eq!(remaining_bodies, vec![json!({"value": 2})]);
    assert_eq!(mocks.queue.len(&jobs), 1);
}
