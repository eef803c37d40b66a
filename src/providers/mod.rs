//! Provider selection and wiring.
//!
//! Application code depends on the [`Providers`] bundle of trait objects.
//! Which concrete adapter backs each port is decided in exactly one place,
//! [`build_providers`], from a [`ProviderConfig`].

pub mod bundle;
pub mod cell;
pub mod config;
pub mod factory;

pub use bundle::{MockProviders, Providers};
pub use cell::ProviderCell;
pub use config::{
    AuthConfig, ConfigError, EmailConfig, EventsConfig, ProviderConfig, QueueConfig, StorageConfig,
};
pub use factory::{ProviderError, build_providers};

#[cfg(test)]
mod tests;
