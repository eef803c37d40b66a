//! Shared world state for session lifecycle BDD scenarios.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use rstest::fixture;
use switchyard::auth::{
    adapters::memory::{MockAuthProvider, mock_oauth_client},
    domain::Session,
};
use switchyard::clock::ManualClock;

/// Scenario world for session behaviour tests.
pub struct SessionWorld {
    /// Clock shared with the provider.
    pub clock: ManualClock,
    /// The provider under test.
    pub auth: Option<MockAuthProvider<ManualClock>>,
    /// The session created by the scenario.
    pub session: Option<Session>,
}

impl SessionWorld {
    /// Creates a world with a frozen clock and no provider yet.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 1, 1, 9, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self {
            clock: ManualClock::new(start),
            auth: None,
            session: None,
        }
    }

    /// Installs a provider with the given session lifetime.
    pub fn install_provider(&mut self, ttl_secs: i64) -> Result<(), eyre::Report> {
        let provider = MockAuthProvider::with_settings(
            Duration::seconds(ttl_secs),
            mock_oauth_client(),
            Arc::new(self.clock.clone()),
        )
        .map_err(|err| eyre::eyre!("provider setup failed: {err}"))?;
        self.auth = Some(provider);
        Ok(())
    }

    /// Returns the provider or an error if none was installed.
    pub fn auth(&self) -> Result<&MockAuthProvider<ManualClock>, eyre::Report> {
        self.auth
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no session provider in scenario world"))
    }

    /// Returns the scenario's session.
    pub fn session(&self) -> Result<&Session, eyre::Report> {
        self.session
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no session in scenario world"))
    }
}

impl Default for SessionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SessionWorld {
    SessionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
