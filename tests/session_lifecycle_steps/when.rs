//! When steps for session lifecycle BDD scenarios.

use super::world::{SessionWorld, run_async};
use chrono::Duration;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use switchyard::auth::ports::AuthProvider;

#[when("the session is invalidated")]
fn invalidate(world: &mut SessionWorld) -> Result<(), eyre::Report> {
    let id = world.session()?.id().clone();
    run_async(world.auth()?.invalidate_session(&id)).wrap_err("invalidate session")?;
    Ok(())
}

#[when("{seconds:i64} seconds pass")]
fn time_passes(world: &mut SessionWorld, seconds: i64) {
    world.clock.advance(Duration::seconds(seconds));
}
