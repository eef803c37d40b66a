//! Subscriber callbacks.

use crate::events::domain::DomainEvent;
use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;
use thiserror::Error;

/// Failure reported by an event handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Creates a handler error with a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Reacts to published events of the types it was subscribed to.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handles one event.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError`] when the reaction failed. The bus reports
    /// the failure to the publisher after the remaining handlers ran.
    async fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError>;
}

/// Handler backed by a closure returning a future.
pub struct FnHandler<F, Fut> {
    callback: F,
    _future: PhantomData<fn() -> Fut>,
}

/// Adapts a closure into an [`EventHandler`].
///
/// The closure receives an owned copy of the event so the returned future
/// need not borrow from the bus.
///
/// # Examples
///
/// ```
/// use switchyard::events::ports::{EventHandler, handler_fn};
///
/// let handler = handler_fn(|_event| async { Ok(()) });
/// let _: &dyn EventHandler = &handler;
/// ```
pub fn handler_fn<F, Fut>(callback: F) -> FnHandler<F, Fut>
where
    F: Fn(DomainEvent) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HandlerError>> + Send,
{
    FnHandler {
        callback,
        _future: PhantomData,
    }
}

#[async_trait]
impl<F, Fut> EventHandler for FnHandler<F, Fut>
where
    F: Fn(DomainEvent) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HandlerError>> + Send,
{
    async fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        (self.callback)(event.clone()).await
    }
}
