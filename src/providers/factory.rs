//! The single place where adapters are chosen.

use std::sync::Arc;

use mockable::DefaultClock;
use thiserror::Error;
use tracing::info;

use super::config::{
    AuthConfig, ConfigError, EmailConfig, EventsConfig, ProviderConfig, QueueConfig, StorageConfig,
};
use super::Providers;
use crate::auth::{
    adapters::memory::MockAuthProvider,
    domain::session_ttl,
    ports::{AuthError, AuthProvider},
};
use crate::email::{
    adapters::{log::LogEmailSender, memory::InMemoryEmailSender},
    ports::EmailSender,
};
use crate::events::{
    adapters::{ForwardingEventBus, InMemoryEventBus, OutboxEventSink},
    ports::{EventBus, SinkError},
};
use crate::queue::{adapters::memory::InMemoryQueue, ports::MessageQueue};
use crate::storage::{
    adapters::{
        filesystem::FilesystemStorage,
        memory::{DEFAULT_MEMORY_BASE_URL, InMemoryStorage},
    },
    domain::{StorageDomainError, UrlSigner, url_ttl},
    ports::{ObjectStorage, StorageError},
};

/// Errors raised while constructing providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The storage adapter could not be set up.
    #[error("storage provider setup failed: {0}")]
    Storage(#[from] StorageError),

    /// The auth adapter could not be set up.
    #[error("auth provider setup failed: {0}")]
    Auth(#[from] AuthError),

    /// The event transport could not be opened.
    #[error("event provider setup failed: {0}")]
    Events(#[from] SinkError),
}

impl From<StorageDomainError> for ProviderError {
    fn from(err: StorageDomainError) -> Self {
        Self::Storage(StorageError::Domain(err))
    }
}

/// Builds every provider selected by `config`.
///
/// # Errors
///
/// Returns [`ProviderError`] when the configuration is invalid or an
/// adapter cannot be opened.
///
/// # Examples
///
/// ```
/// use switchyard::providers::{ProviderConfig, build_providers};
///
/// let providers = build_providers(&ProviderConfig::default()).expect("defaults build");
/// assert!(providers.events.supports_subscribe());
/// ```
pub fn build_providers(config: &ProviderConfig) -> Result<Providers, ProviderError> {
    config.validate()?;
    let providers = Providers {
        queue: build_queue(&config.queue),
        email: build_email(&config.email),
        storage: build_storage(&config.storage)?,
        auth: build_auth(&config.auth)?,
        events: build_events(&config.events)?,
    };
    info!(
        queue = config.queue.backend_name(),
        email = config.email.backend_name(),
        storage = config.storage.backend_name(),
        auth = config.auth.backend_name(),
        events = config.events.backend_name(),
        "providers built"
    );
    Ok(providers)
}

fn build_queue(config: &QueueConfig) -> Arc<dyn MessageQueue> {
    match config {
        QueueConfig::Memory => Arc::new(InMemoryQueue::new()),
    }
}

fn build_email(config: &EmailConfig) -> Arc<dyn EmailSender> {
    match config {
        EmailConfig::Memory => Arc::new(InMemoryEmailSender::new()),
        EmailConfig::Log { default_from } => Arc::new(LogEmailSender::new(default_from.clone())),
    }
}

fn signer(
    base_url: &str,
    signing_secret: Option<&str>,
    url_ttl_secs: i64,
) -> Result<UrlSigner, StorageDomainError> {
    let ttl = url_ttl(url_ttl_secs)?;
    match signing_secret {
        Some(secret) => UrlSigner::new(base_url, secret.as_bytes(), ttl),
        None => UrlSigner::new(base_url, uuid::Uuid::new_v4().as_bytes(), ttl),
    }
}

fn build_storage(config: &StorageConfig) -> Result<Arc<dyn ObjectStorage>, ProviderError> {
    match config {
        StorageConfig::Memory {
            base_url,
            signing_secret,
            url_ttl_secs,
        } => {
            let url_signer = signer(
                base_url.as_deref().unwrap_or(DEFAULT_MEMORY_BASE_URL),
                signing_secret.as_deref(),
                *url_ttl_secs,
            )?;
            Ok(Arc::new(InMemoryStorage::with_signer(
                url_signer,
                Arc::new(DefaultClock),
            )))
        }
        StorageConfig::Filesystem {
            root,
            base_url,
            signing_secret,
            url_ttl_secs,
        } => {
            let url_signer = signer(base_url, signing_secret.as_deref(), *url_ttl_secs)?;
            Ok(Arc::new(FilesystemStorage::open(root, url_signer)?))
        }
    }
}

fn build_auth(config: &AuthConfig) -> Result<Arc<dyn AuthProvider>, ProviderError> {
    let AuthConfig::Mock {
        session_ttl_secs,
        users,
        oauth,
    } = config;
    let ttl = session_ttl(*session_ttl_secs).map_err(AuthError::from)?;
    let provider = MockAuthProvider::with_settings(
        ttl,
        oauth.clone(),
        Arc::new(DefaultClock),
    )
    .map_err(AuthError::from)?;
    for user in users {
        provider.register_user(user.clone())?;
    }
    Ok(Arc::new(provider))
}

fn build_events(config: &EventsConfig) -> Result<Arc<dyn EventBus>, ProviderError> {
    match config {
        EventsConfig::Memory => Ok(Arc::new(InMemoryEventBus::new())),
        EventsConfig::Outbox {
            directory,
            source_prefix,
        } => {
            let sink = OutboxEventSink::open(directory)?;
            Ok(Arc::new(ForwardingEventBus::with_clock(
                Arc::new(sink),
                source_prefix.clone(),
                Arc::new(DefaultClock),
            )))
        }
    }
}
