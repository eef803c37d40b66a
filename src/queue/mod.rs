//! Message queue capability.
//!
//! Named queues hold JSON messages until a consumer deletes them. The
//! module follows the same hexagonal split as every other capability:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
