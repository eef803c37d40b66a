//! Then steps for queue lifecycle BDD scenarios.

use super::world::QueueWorld;
use rstest_bdd_macros::then;
use switchyard::error::ErrorKind;
use switchyard::queue::domain::QueueMessage;

fn received(world: &QueueWorld) -> Result<&[QueueMessage], eyre::Report> {
    world
        .last_received
        .as_deref()
        .ok_or_else(|| eyre::eyre!("no receive result in scenario world"))
}

#[then(r#"the received values are "{values}""#)]
fn received_values(world: &QueueWorld, values: String) -> Result<(), eyre::Report> {
    let expected: Vec<u64> = values
        .split(',')
        .map(|raw| raw.trim().parse::<u64>())
        .collect::<Result<_, _>>()
        .map_err(|err| eyre::eyre!("bad expected values '{values}': {err}"))?;
    let actual: Vec<u64> = received(world)?
        .iter()
        .filter_map(|message| message.body().get("value").and_then(serde_json::Value::as_u64))
        .collect();
    if actual != expected {
        return Err(eyre::eyre!("expected values {expected:?}, received {actual:?}"));
    }
    Ok(())
}

#[then("every received message has {attempts:u32} attempts")]
fn received_attempts(world: &QueueWorld, attempts: u32) -> Result<(), eyre::Report> {
    if let Some(message) = received(world)?
        .iter()
        .find(|message| message.attempts() != attempts)
    {
        return Err(eyre::eyre!(
            "message {} has {} attempts, expected {attempts}",
            message.id(),
            message.attempts()
        ));
    }
    Ok(())
}

#[then("no messages are received")]
fn nothing_received(world: &QueueWorld) -> Result<(), eyre::Report> {
    let messages = received(world)?;
    if !messages.is_empty() {
        return Err(eyre::eyre!("expected no messages, got {}", messages.len()));
    }
    Ok(())
}

#[then("the receive is rejected as invalid")]
fn receive_rejected(world: &QueueWorld) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected a rejected receive"))?;
    if err.kind() != ErrorKind::Validation {
        return Err(eyre::eyre!("expected a validation error, got {err:?}"));
    }
    Ok(())
}
