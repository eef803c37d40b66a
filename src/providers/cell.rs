//! Process-wide, initialise-once provider cache.

use std::future::Future;

use tokio::sync::OnceCell;
use tracing::debug;

use super::{ProviderConfig, ProviderError, Providers, build_providers};

static GLOBAL: ProviderCell = ProviderCell::new();

/// Holds the providers built on first use.
///
/// Concurrent callers racing on an empty cell all wait for the single
/// initialisation in flight. A failed initialisation leaves the cell empty,
/// so the next caller retries.
#[derive(Debug, Default)]
pub struct ProviderCell {
    cell: OnceCell<Providers>,
}

impl ProviderCell {
    /// Creates an empty cell.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    /// Returns the cell shared by the whole process.
    #[must_use]
    pub const fn global() -> &'static Self {
        &GLOBAL
    }

    /// Returns the providers if they were already built.
    #[must_use]
    pub fn get(&self) -> Option<&Providers> {
        self.cell.get()
    }

    /// Returns the cached providers, running `init` if none exist yet.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `init`.
    pub async fn get_or_try_init<F, Fut>(&self, init: F) -> Result<&Providers, ProviderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Providers, ProviderError>>,
    {
        self.cell.get_or_try_init(init).await
    }

    /// Returns the cached providers, building them from `config` on first
    /// use.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when building fails.
    pub async fn get_or_build(&self, config: &ProviderConfig) -> Result<&Providers, ProviderError> {
        self.get_or_try_init(|| async {
            debug!("initialising providers");
            build_providers(config)
        })
        .await
    }
}
