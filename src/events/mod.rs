//! Domain event publishing capability.
//!
//! Events are a closed sum type. The in-memory bus fans each event out to
//! the handlers subscribed to its exact type and waits for all of them.
//! The forwarding bus hands events to an external transport instead and
//! rejects runtime subscriptions.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
