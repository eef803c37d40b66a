//! Blob storage capability.
//!
//! Objects are byte payloads addressed by hierarchical keys. Adapters keep
//! them in memory or under a capability-scoped filesystem directory and
//! hand out HMAC-signed, time-bounded access URLs.

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
