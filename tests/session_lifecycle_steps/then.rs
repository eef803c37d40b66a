//! Then steps for session lifecycle BDD scenarios.

use super::world::{SessionWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use switchyard::auth::ports::AuthProvider;

#[then(r#"the session validates for user "{user}""#)]
fn session_validates(world: &mut SessionWorld, user: String) -> Result<(), eyre::Report> {
    let id = world.session()?.id().clone();
    let found = run_async(world.auth()?.validate_session(&id))
        .wrap_err("validate session")?
        .ok_or_else(|| eyre::eyre!("session {id} did not validate"))?;
    if found.user_id().as_str() != user {
        return Err(eyre::eyre!(
            "session belongs to {}, expected {user}",
            found.user_id()
        ));
    }
    Ok(())
}

#[then("the session no longer validates")]
fn session_invalid(world: &mut SessionWorld) -> Result<(), eyre::Report> {
    let id = world.session()?.id().clone();
    let found = run_async(world.auth()?.validate_session(&id)).wrap_err("validate session")?;
    if let Some(session) = found {
        return Err(eyre::eyre!("session {} still validates", session.id()));
    }
    Ok(())
}
