//! Given steps for event fan-out BDD scenarios.

use std::sync::Arc;

use super::world::{EventWorld, event_type, failing_handler, run_async};
use camino::Utf8PathBuf;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use switchyard::events::adapters::{ForwardingEventBus, OutboxEventSink};
use switchyard::events::ports::EventBus;
use tempfile::TempDir;

#[given(r#"a handler "{label}" subscribed to "{kind}""#)]
fn handler_subscribed(
    world: &mut EventWorld,
    label: String,
    kind: String,
) -> Result<(), eyre::Report> {
    let handler = world.counting_handler(&label);
    run_async(world.bus.subscribe(event_type(&kind)?, handler)).wrap_err("subscribe handler")?;
    Ok(())
}

#[given(r#"a failing handler subscribed to "{kind}""#)]
fn failing_handler_subscribed(world: &mut EventWorld, kind: String) -> Result<(), eyre::Report> {
    run_async(world.bus.subscribe(event_type(&kind)?, failing_handler()))
        .wrap_err("subscribe failing handler")?;
    Ok(())
}

#[given("a forwarding event bus writing to an outbox")]
fn forwarding_bus(world: &mut EventWorld) -> Result<(), eyre::Report> {
    let scratch = TempDir::new().wrap_err("create outbox directory")?;
    let directory = Utf8PathBuf::from_path_buf(scratch.path().join("outbox"))
        .map_err(|path| eyre::eyre!("non UTF-8 temp path: {}", path.display()))?;
    let sink = Arc::new(OutboxEventSink::open(&directory).wrap_err("open outbox")?);
    world.bus = Arc::new(ForwardingEventBus::new(Arc::clone(&sink)));
    world.outbox = Some(sink);
    world.scratch = Some(scratch);
    Ok(())
}
