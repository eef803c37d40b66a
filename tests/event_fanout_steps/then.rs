//! Then steps for event fan-out BDD scenarios.

use super::world::{EventWorld, run_async};
use rstest_bdd_macros::then;
use switchyard::error::ErrorKind;
use switchyard::events::ports::EventBusError;

#[then(r#"the handler "{label}" ran {count:usize} times"#)]
fn handler_ran(world: &EventWorld, label: String, count: usize) -> Result<(), eyre::Report> {
    let actual = world.count(&label);
    if actual != count {
        return Err(eyre::eyre!(
            "expected handler '{label}' to run {count} times, ran {actual}"
        ));
    }
    Ok(())
}

#[then("publishing reports {count:usize} handler failure")]
fn publish_reports_failures(world: &EventWorld, count: usize) -> Result<(), eyre::Report> {
    match &world.last_publish {
        Some(Err(EventBusError::HandlerFailed { failures, .. })) if failures.len() == count => {
            Ok(())
        }
        other => Err(eyre::eyre!(
            "expected {count} handler failure(s), got {other:?}"
        )),
    }
}

#[then("the subscription is rejected as unsupported")]
fn subscription_rejected(world: &EventWorld) -> Result<(), eyre::Report> {
    match &world.last_subscribe {
        Some(Err(err)) if err.kind() == ErrorKind::Unsupported => Ok(()),
        other => Err(eyre::eyre!("expected an unsupported error, got {other:?}")),
    }
}

#[then("the outbox holds {count:usize} envelope")]
fn outbox_holds(world: &EventWorld, count: usize) -> Result<(), eyre::Report> {
    let outbox = world
        .outbox
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no outbox in scenario world"))?;
    let envelopes =
        run_async(outbox.read_all()).map_err(|err| eyre::eyre!("read outbox: {err}"))?;
    if envelopes.len() != count {
        return Err(eyre::eyre!(
            "expected {count} envelope(s), found {}",
            envelopes.len()
        ));
    }
    Ok(())
}
