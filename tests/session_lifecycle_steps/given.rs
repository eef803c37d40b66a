//! Given steps for session lifecycle BDD scenarios.

use super::world::{SessionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use switchyard::auth::{domain::UserId, ports::AuthProvider};

#[given("a session provider with a lifetime of {seconds:i64} seconds")]
fn session_provider(world: &mut SessionWorld, seconds: i64) -> Result<(), eyre::Report> {
    world.install_provider(seconds)
}

#[given(r#"a session for user "{user}""#)]
fn session_for_user(world: &mut SessionWorld, user: String) -> Result<(), eyre::Report> {
    let user_id = UserId::new(user).wrap_err("user id for scenario")?;
    let session =
        run_async(world.auth()?.create_session(&user_id)).wrap_err("create session")?;
    world.session = Some(session);
    Ok(())
}
