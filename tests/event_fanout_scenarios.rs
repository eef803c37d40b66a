//! Behaviour tests for event fan-out.

mod event_fanout_steps;

use event_fanout_steps::world::{EventWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/event_fanout.feature",
    name = "Handlers receive only their event type"
)]
#[tokio::test(flavor = "multi_thread")]
async fn handlers_receive_only_their_type(world: EventWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/event_fanout.feature",
    name = "Every handler for a type runs once per publish"
)]
#[tokio::test(flavor = "multi_thread")]
async fn every_handler_runs_once_per_publish(world: EventWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/event_fanout.feature",
    name = "A failing handler does not stop its siblings"
)]
#[tokio::test(flavor = "multi_thread")]
async fn failing_handler_does_not_stop_siblings(world: EventWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/event_fanout.feature",
    name = "A forwarding bus rejects subscriptions"
)]
#[tokio::test(flavor = "multi_thread")]
async fn forwarding_bus_rejects_subscriptions(world: EventWorld) {
    let _ = world;
}
