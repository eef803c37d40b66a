//! When steps for event fan-out BDD scenarios.

use super::world::{EventWorld, event_type, run_async, sample_event};
use rstest_bdd_macros::when;
use switchyard::events::ports::EventBus;

#[when(r#"a "{kind}" event is published"#)]
fn publish_event(world: &mut EventWorld, kind: String) -> Result<(), eyre::Report> {
    let event = sample_event(event_type(&kind)?);
    world.last_publish = Some(run_async(world.bus.publish(&event)));
    Ok(())
}

#[when(r#"a handler "{label}" subscribes to "{kind}""#)]
fn handler_subscribes(world: &mut EventWorld, label: String, kind: String) -> Result<(), eyre::Report> {
    let handler = world.counting_handler(&label);
    world.last_subscribe = Some(run_async(world.bus.subscribe(event_type(&kind)?, handler)));
    Ok(())
}
