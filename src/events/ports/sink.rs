//! Transport seam for externally managed event buses.

use crate::events::domain::EventEnvelope;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Failure delivering an envelope to the transport.
#[derive(Debug, Clone, Error)]
#[error("event sink error: {0}")]
pub struct SinkError(Arc<dyn std::error::Error + Send + Sync>);

impl SinkError {
    /// Wraps a transport failure.
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}

/// Accepts envelopes on behalf of a managed bus.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Delivers one envelope.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the transport rejects or cannot reach the
    /// destination.
    async fn put(&self, envelope: &EventEnvelope) -> Result<(), SinkError>;
}
