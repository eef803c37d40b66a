//! Email delivery capability.
//!
//! A single `send` operation hands an immutable message to a transport and
//! returns it enriched with an identifier and send instant. Templates
//! rendered with `minijinja` produce messages for common notifications.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
