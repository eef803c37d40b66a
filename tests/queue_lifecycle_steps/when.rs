//! When steps for queue lifecycle BDD scenarios.

use super::world::{QueueWorld, queue_name, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use serde_json::json;
use switchyard::queue::{
    domain::ReceiveOptions,
    ports::{MessageQueue, QueueError},
};

#[when(r#"a message with value {value:usize} is sent to "{queue}""#)]
fn send_message(world: &mut QueueWorld, value: usize, queue: String) -> Result<(), eyre::Report> {
    let name = queue_name(&queue)?;
    let id = run_async(world.queue.send(&name, json!({"value": value})))
        .wrap_err("send message for scenario")?;
    world.sent.push(id);
    Ok(())
}

#[when(r#"up to {count:usize} messages are received from "{queue}""#)]
fn receive_messages(world: &mut QueueWorld, count: usize, queue: String) -> Result<(), eyre::Report> {
    let name = queue_name(&queue)?;
    let options = match ReceiveOptions::with_max_messages(count) {
        Ok(options) => options,
        Err(err) => {
            world.last_error = Some(QueueError::from(err));
            world.last_received = None;
            return Ok(());
        }
    };
    let received =
        run_async(world.queue.receive(&name, options)).wrap_err("receive for scenario")?;
    world.last_received = Some(received);
    Ok(())
}

#[when(r#"the first sent message is deleted from "{queue}""#)]
fn delete_first(world: &mut QueueWorld, queue: String) -> Result<(), eyre::Report> {
    let name = queue_name(&queue)?;
    let first = world
        .sent
        .first()
        .copied()
        .ok_or_else(|| eyre::eyre!("no message was sent in this scenario"))?;
    run_async(world.queue.delete(&name, first)).wrap_err("delete for scenario")?;
    Ok(())
}

#[when(r#"the queue "{queue}" is purged"#)]
fn purge_queue(world: &mut QueueWorld, queue: String) -> Result<(), eyre::Report> {
    let name = queue_name(&queue)?;
    run_async(world.queue.purge(&name)).wrap_err("purge for scenario")?;
    Ok(())
}
