//! Dependency-injection bundles.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use mockable::{Clock, DefaultClock};

use super::ProviderError;
use crate::auth::{
    adapters::memory::{MockAuthProvider, mock_oauth_client},
    domain::DEFAULT_SESSION_TTL_SECS,
    ports::{AuthError, AuthProvider},
};
use crate::email::{adapters::memory::InMemoryEmailSender, ports::EmailSender};
use crate::events::{adapters::InMemoryEventBus, ports::EventBus};
use crate::queue::{adapters::memory::InMemoryQueue, ports::MessageQueue};
use crate::storage::{
    adapters::memory::{DEFAULT_MEMORY_BASE_URL, InMemoryStorage},
    domain::{DEFAULT_URL_TTL_SECS, UrlSigner},
    ports::ObjectStorage,
};

/// One handle per capability, each behind its port trait.
#[derive(Clone)]
pub struct Providers {
    /// Message queue.
    pub queue: Arc<dyn MessageQueue>,
    /// Email sender.
    pub email: Arc<dyn EmailSender>,
    /// Object storage.
    pub storage: Arc<dyn ObjectStorage>,
    /// Session provider.
    pub auth: Arc<dyn AuthProvider>,
    /// Event bus.
    pub events: Arc<dyn EventBus>,
}

impl fmt::Debug for Providers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Providers")
            .field("events_support_subscribe", &self.events.supports_subscribe())
            .finish_non_exhaustive()
    }
}

/// In-memory adapters with their concrete types exposed for inspection.
///
/// Tests drive code through [`MockProviders::providers`] and then assert on
/// the recorded state, for example the emails in
/// [`InMemoryEmailSender::sent`].
///
/// # Examples
///
/// ```
/// use switchyard::providers::MockProviders;
///
/// let mocks = MockProviders::new().expect("mock providers build");
/// let providers = mocks.providers();
/// assert!(providers.events.supports_subscribe());
/// assert!(mocks.email.sent().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct MockProviders<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    /// Queue adapter.
    pub queue: Arc<InMemoryQueue<C>>,
    /// Email adapter.
    pub email: Arc<InMemoryEmailSender<C>>,
    /// Storage adapter.
    pub storage: Arc<InMemoryStorage<C>>,
    /// Auth adapter.
    pub auth: Arc<MockAuthProvider<C>>,
    /// Event bus.
    pub events: Arc<InMemoryEventBus>,
}

impl MockProviders<DefaultClock> {
    /// Builds mocks driven by the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if a default adapter cannot be built.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl<C> MockProviders<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Builds mocks sharing `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if a default adapter cannot be built.
    pub fn with_clock(clock: Arc<C>) -> Result<Self, ProviderError> {
        let signer = UrlSigner::new(
            DEFAULT_MEMORY_BASE_URL,
            uuid::Uuid::new_v4().as_bytes(),
            Duration::seconds(DEFAULT_URL_TTL_SECS),
        )?;
        let auth = MockAuthProvider::with_settings(
            Duration::seconds(DEFAULT_SESSION_TTL_SECS),
            mock_oauth_client(),
            Arc::clone(&clock),
        )
        .map_err(AuthError::from)?;
        Ok(Self {
            queue: Arc::new(InMemoryQueue::with_clock(Arc::clone(&clock))),
            email: Arc::new(InMemoryEmailSender::with_clock(Arc::clone(&clock))),
            storage: Arc::new(InMemoryStorage::with_signer(signer, clock)),
            auth: Arc::new(auth),
            events: Arc::new(InMemoryEventBus::new()),
        })
    }

    /// Returns a port bundle sharing state with these mocks.
    #[must_use]
    pub fn providers(&self) -> Providers {
        Providers {
            queue: Arc::clone(&self.queue) as Arc<dyn MessageQueue>,
            email: Arc::clone(&self.email) as Arc<dyn EmailSender>,
            storage: Arc::clone(&self.storage) as Arc<dyn ObjectStorage>,
            auth: Arc::clone(&self.auth) as Arc<dyn AuthProvider>,
            events: Arc::clone(&self.events) as Arc<dyn EventBus>,
        }
    }

    /// Converts the mocks into a port bundle.
    #[must_use]
    pub fn into_providers(self) -> Providers {
        Providers {
            queue: self.queue,
            email: self.email,
            storage: self.storage,
            auth: self.auth,
            events: self.events,
        }
    }
}
